use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

/// Accumulated over one organizing run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub processed: u64,
    pub missing_date: u64,
    pub missing_camera: u64,
    pub missing_exif: u64,
    pub raw_jpeg_pairs: u64,
    /// Camera usage in first-seen order (ties in the report keep this order)
    cameras: Vec<(String, u64)>,
    /// Destination-relative path -> lowercase hex SHA-256
    pub checksums: BTreeMap<String, String>,
}

impl RunStats {
    pub fn record_camera(&mut self, name: &str) {
        match self.cameras.iter_mut().find(|(known, _)| known == name) {
            Some(entry) => entry.1 += 1,
            None => self.cameras.push((name.to_string(), 1)),
        }
    }

    /// Histogram sorted by descending usage; the sort is stable so equal
    /// counts stay in first-seen order.
    pub fn camera_histogram(&self) -> Vec<(&str, u64)> {
        let mut histogram: Vec<(&str, u64)> = self
            .cameras
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        histogram.sort_by(|a, b| b.1.cmp(&a.1));
        histogram
    }
}

/// Everything the end-of-run report needs.
#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStats,
    pub duration: Duration,
}

impl RunReport {
    /// Pure formatting; the shell just prints the result.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(50);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "PROCESSING REPORT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Processed: {} files", self.stats.processed);

        let histogram = self.stats.camera_histogram();
        if !histogram.is_empty() {
            let cameras = histogram
                .iter()
                .map(|(name, count)| format!("{name} ({count})"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "Cameras: {cameras}");
        }
        if self.stats.missing_exif > 0 {
            let _ = writeln!(out, "Missing EXIF: {} files", self.stats.missing_exif);
        }
        if self.stats.raw_jpeg_pairs > 0 {
            let _ = writeln!(out, "RAW/JPG pairs matched: {}", self.stats.raw_jpeg_pairs);
        }
        let _ = writeln!(out, "Duration: {}", format_duration(self.duration));
        let _ = write!(out, "{rule}");
        out
    }
}

/// `HH:MM:SS`, hours unbounded.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
