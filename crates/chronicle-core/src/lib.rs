pub mod camera;
pub mod checksum;
pub mod classify;
pub mod exif;
pub mod group;
pub mod media;
pub mod planner;
pub mod resolve;
pub mod scan;
pub mod settings;
pub mod stats;
pub mod transfer;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use log::info;

pub use crate::resolve::{MetadataPrompt, MissingFields, PromptReply};
pub use crate::settings::Settings;
pub use crate::stats::{RunReport, RunStats};

/// Folder nesting order for the destination tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeScheme {
    CameraYearMonth,
    YearMonth,
    YearMonthCamera,
}

impl OrganizeScheme {
    pub const ALL: [OrganizeScheme; 3] = [
        OrganizeScheme::CameraYearMonth,
        OrganizeScheme::YearMonth,
        OrganizeScheme::YearMonthCamera,
    ];

    /// Parse a settings key; anything unrecognized falls back to the default
    /// layout rather than failing.
    pub fn from_key(key: &str) -> Self {
        match key {
            "year_month" => OrganizeScheme::YearMonth,
            "year_month_camera" => OrganizeScheme::YearMonthCamera,
            _ => OrganizeScheme::CameraYearMonth,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            OrganizeScheme::CameraYearMonth => "camera_year_month",
            OrganizeScheme::YearMonth => "year_month",
            OrganizeScheme::YearMonthCamera => "year_month_camera",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            OrganizeScheme::CameraYearMonth => "Camera/Year/Month",
            OrganizeScheme::YearMonth => "Year/Month",
            OrganizeScheme::YearMonthCamera => "Year/Month/Camera",
        }
    }
}

/// Month folder label style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFormat {
    /// "01 - January"
    Full,
    /// "01"
    Number,
}

impl MonthFormat {
    pub const ALL: [MonthFormat; 2] = [MonthFormat::Full, MonthFormat::Number];

    pub fn from_key(key: &str) -> Self {
        match key {
            "number" => MonthFormat::Number,
            _ => MonthFormat::Full,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MonthFormat::Full => "full",
            MonthFormat::Number => "number",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            MonthFormat::Full => "Full (01 - January)",
            MonthFormat::Number => "Number (01)",
        }
    }
}

/// Everything one organizing run needs, loaded once and threaded through the
/// pipeline.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Move instead of copy
    pub move_files: bool,
    pub scheme: OrganizeScheme,
    pub month_format: MonthFormat,
    pub separate_file_types: bool,
}

impl OrganizeOptions {
    pub fn from_settings(
        settings: &Settings,
        source: PathBuf,
        destination: PathBuf,
        move_files: bool,
    ) -> Self {
        Self {
            source,
            destination,
            move_files,
            scheme: settings.scheme(),
            month_format: settings.month_format(),
            separate_file_types: settings.separate_file_types,
        }
    }
}

/// Run the full pipeline: discover, resolve metadata (prompting through
/// `prompt` where it is missing, counting it where there is no prompt),
/// group, place, transfer, and persist the checksum ledger.
///
/// Two passes: every file is resolved before the first one moves, so
/// interactive prompts all happen up front.
pub fn organize(
    options: &OrganizeOptions,
    prompt: Option<&dyn MetadataPrompt>,
) -> Result<RunReport> {
    let started = Instant::now();
    if !options.source.is_dir() {
        bail!(
            "Source directory does not exist or is not a directory: {}",
            options.source.display()
        );
    }

    let mut stats = RunStats::default();

    // Pass 1: discovery and resolution.
    let paths = scan::scan_source(&options.source);
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(resolve::resolve_file(path, prompt, &mut stats)?);
    }

    // Pass 2: group, plan, transfer.
    let (groups, pairs) = group::group_files(&files, options.separate_file_types);
    stats.raw_jpeg_pairs = pairs;
    transfer::transfer_groups(&groups, &files, options, &mut stats)?;

    checksum::merge_ledger(&options.destination, &stats.checksums);

    info!(
        "Organized {} files from {} into {}",
        stats.processed,
        options.source.display(),
        options.destination.display()
    );
    Ok(RunReport {
        stats,
        duration: started.elapsed(),
    })
}
