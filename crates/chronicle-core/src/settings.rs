use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{MonthFormat, OrganizeScheme};

/// Per-user preferences file in the home directory.
pub const SETTINGS_FILENAME: &str = ".chronicle_settings.json";

/// User preferences. Unknown keys in the file are ignored; missing keys fall
/// back to defaults field by field; an unparseable file yields the full
/// default set, never a partial merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Empty means "not set"
    pub default_source: String,
    pub default_destination: String,
    pub default_move_files: bool,
    /// Scheme key; anything unrecognized falls back to camera/year/month
    pub organization_scheme: String,
    /// "full" (01 - January) or "number" (01)
    pub month_format: String,
    pub separate_file_types: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_source: String::new(),
            default_destination: String::new(),
            default_move_files: false,
            organization_scheme: OrganizeScheme::CameraYearMonth.key().to_string(),
            month_format: MonthFormat::Full.key().to_string(),
            separate_file_types: true,
        }
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        match BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(SETTINGS_FILENAME),
            None => PathBuf::from(SETTINGS_FILENAME),
        }
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Settings file {} is not valid JSON ({e}); using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Could not create {}", parent.display()))?;
            }
        }
        let content = serde_json::to_string_pretty(self).context("Could not serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Could not write settings to {}", path.display()))
    }

    pub fn scheme(&self) -> OrganizeScheme {
        OrganizeScheme::from_key(&self.organization_scheme)
    }

    pub fn month_format(&self) -> MonthFormat {
        MonthFormat::from_key(&self.month_format)
    }
}
