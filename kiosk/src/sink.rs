//! JSON Lines recorder for submitted reviews.
//!
//! The kiosk binary wires a [`JsonLinesSink`] into the review component's
//! submission callback. Each completed submission becomes one line:
//!
//! ```text
//! {"submitted_at":"2026-10-19T14:03:11.120Z","place_id":"PLACE_ID","name":"Ana","quality":5,"punctuality":4,"service":5}
//! ```
//!
//! The file is opened in append mode so several kiosk sessions can share it.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::review::{ReviewInput, ReviewRecord};

/// One line of the review log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkEntry {
    /// When the submission completed.
    pub submitted_at: DateTime<Utc>,
    /// Place the review was collected for.
    pub place_id: String,
    #[serde(flatten)]
    pub review: ReviewRecord,
}

/// Appends submitted reviews to a JSON Lines file.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    place_id: String,
    writer: BufWriter<File>,
    written: u64,
}

impl JsonLinesSink {
    /// Opens (creating if needed) `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, place_id: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            place_id: place_id.into(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries written through this sink.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Writes one entry for `review`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn record(&mut self, review: &ReviewInput) -> Result<()> {
        self.record_at(review, Utc::now())
    }

    /// Writes one entry for `review` with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn record_at(&mut self, review: &ReviewInput, submitted_at: DateTime<Utc>) -> Result<()> {
        let entry = SinkEntry {
            submitted_at,
            place_id: self.place_id.clone(),
            review: ReviewRecord::from(review),
        };

        serde_json::to_writer(&mut self.writer, &entry)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}
