use std::path::{Path, PathBuf};

use chrono::Month;
use unicode_normalization::UnicodeNormalization;

use crate::classify::FileKind;
use crate::MonthFormat;

/// Sentinel labels for unresolved metadata. Internally a missing value is
/// `None`; these strings appear only in destination paths and the report.
pub const UNKNOWN_CAMERA: &str = "UnknownCamera";
pub const UNKNOWN_YEAR: &str = "UnknownYear";
pub const UNKNOWN_MONTH: &str = "UnknownMonth";

/// One discovered file with its resolved metadata. Immutable after
/// resolution.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Absolute source location
    pub path: PathBuf,
    /// Category derived purely from the extension
    pub kind: FileKind,
    /// Canonical camera label, if resolvable
    pub camera: Option<String>,
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    /// NFC-folded lowercase stem, used only for RAW/JPEG pairing
    pub stem: String,
}

impl MediaFile {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            camera: self.camera.clone(),
            year: self.year,
            month: self.month,
        }
    }
}

/// Case-insensitive pairing stem. NFC first: the same name can arrive NFD
/// from macOS volumes.
pub fn pairing_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .nfc()
        .collect::<String>()
        .to_lowercase()
}

/// (camera, year, month) tuple identity; all files sharing a key land in the
/// same base destination folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub camera: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl GroupKey {
    pub fn camera_label(&self) -> &str {
        self.camera.as_deref().unwrap_or(UNKNOWN_CAMERA)
    }

    pub fn year_label(&self) -> String {
        match self.year {
            Some(year) => format!("{year:04}"),
            None => UNKNOWN_YEAR.to_string(),
        }
    }

    pub fn month_label(&self, format: MonthFormat) -> String {
        match self.month {
            Some(month) => format_month(month, format),
            None => UNKNOWN_MONTH.to_string(),
        }
    }
}

/// Render a month folder label per the active month-format option.
pub fn format_month(month: u32, format: MonthFormat) -> String {
    let Ok(name) = Month::try_from(month as u8) else {
        return UNKNOWN_MONTH.to_string();
    };
    match format {
        MonthFormat::Number => format!("{month:02}"),
        MonthFormat::Full => format!("{month:02} - {}", name.name()),
    }
}
