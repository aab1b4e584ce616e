use std::{fmt, time::Duration};

use serde::Serialize;

use crate::error::Result;

/// Summary printed after a compression run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub uncompressed_bytes: u64,
    pub uncompressed_kb: u64,
    pub compressed_bytes: u64,
    pub compressed_kb: u64,
    pub ratio_percent: u64,
    pub elapsed_ms: u128,
}

impl Report {
    pub fn new(uncompressed_bytes: u64, compressed_bytes: u64, elapsed: Duration) -> Self {
        Self {
            uncompressed_bytes,
            uncompressed_kb: uncompressed_bytes / 1024,
            compressed_bytes,
            compressed_kb: compressed_bytes / 1024,
            ratio_percent: ratio_percent(uncompressed_bytes, compressed_bytes),
            elapsed_ms: elapsed.as_millis(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `round(compressedKB / uncompressedKB * 100)`.
///
/// Inputs smaller than one kilobyte fall back to byte counts, and an empty input has a ratio
/// of 0.
pub fn ratio_percent(uncompressed_bytes: u64, compressed_bytes: u64) -> u64 {
    let (num, den) = match (compressed_bytes / 1024, uncompressed_bytes / 1024) {
        (_, 0) => (compressed_bytes, uncompressed_bytes),
        kbs => kbs,
    };

    if den == 0 {
        return 0;
    }

    (num as f64 / den as f64 * 100.0).round() as u64
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Uncompressed file size: {} Kb ({} bytes)", self.uncompressed_kb, self.uncompressed_bytes)?;
        writeln!(f, "Compressed file size: {} Kb ({} bytes)", self.compressed_kb, self.compressed_bytes)?;
        writeln!(f, "Compression ratio: {}%", self.ratio_percent)?;
        write!(f, "Running Time: {} milliseconds", self.elapsed_ms)
    }
}

#[test]
fn test_ratio_in_kilobytes() {
    // 3 Kb out of 5 Kb, the leftover bytes are ignored as in the kilobyte figures.
    assert_eq!(ratio_percent(5 * 1024 + 1000, 3 * 1024 + 10), 60);
    assert_eq!(ratio_percent(3 * 1024, 2 * 1024), 67);
}

#[test]
fn test_ratio_below_one_kilobyte() {
    assert_eq!(ratio_percent(800, 450), 56);
    assert_eq!(ratio_percent(0, 0), 0);
}

#[test]
fn test_report_rendering() {
    let report = Report::new(2048, 1024, Duration::from_millis(1500));

    assert_eq!(
        report.to_string(),
        "Uncompressed file size: 2 Kb (2048 bytes)\n\
         Compressed file size: 1 Kb (1024 bytes)\n\
         Compression ratio: 50%\n\
         Running Time: 1500 milliseconds"
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["ratio_percent"], 50);
    assert_eq!(json["elapsed_ms"], 1500);
}
