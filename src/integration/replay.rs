//! Detection source that replays recorded frames from newline-delimited JSON.
//!
//! Each non-blank line is one frame:
//!
//! ```text
//! {"timestamp": 0.1, "boxes": [[90, 40, 20, 20], [300, 40, 80, 30]]}
//! ```
//!
//! Boxes are `[x, y, width, height]` in pixels.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DetectionBuilder, DetectionSource, Frame};
use crate::error::{Result, TrackerError};

/// On-disk form of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(alias = "t")]
    pub timestamp: f64,
    #[serde(default)]
    pub boxes: Vec<[i32; 4]>,
}

pub struct ReplaySource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl ReplaySource<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    fn parse_line(&self, line: &str) -> Result<Frame> {
        let record: FrameRecord =
            serde_json::from_str(line).map_err(|source| TrackerError::MalformedFrame {
                line: self.line_no,
                source,
            })?;

        let detections = record
            .boxes
            .iter()
            .map(|&[x, y, w, h]| DetectionBuilder::new().tlwh(x, y, w, h).build())
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match e {
                TrackerError::InvalidDetection(reason) => TrackerError::MalformedBox {
                    line: self.line_no,
                    reason,
                },
                other => other,
            })?;

        Ok(Frame {
            timestamp: record.timestamp,
            detections,
        })
    }
}

impl<R: BufRead> DetectionSource for ReplaySource<R> {
    type Error = TrackerError;

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return self.parse_line(line).map(Some);
        }
    }
}
