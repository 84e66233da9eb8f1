use std::path::Path;

use anyhow::Result;
use chrono::Datelike;
use log::debug;

use crate::camera;
use crate::classify::FileKind;
use crate::exif::{self, ExifData};
use crate::media::{pairing_stem, MediaFile, UNKNOWN_CAMERA};
use crate::stats::RunStats;

/// What a single file is missing, handed to the prompt capability.
#[derive(Debug, Clone)]
pub struct MissingFields {
    pub file_name: String,
    pub camera: bool,
    pub date: bool,
}

/// Raw operator-entered values. Empty strings select the unknown sentinels;
/// validation happens in the resolver, not in the prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptReply {
    pub camera: String,
    pub year: String,
    pub month: String,
}

/// Blocking request/response with the operator, pluggable so the resolution
/// policy can be exercised without a terminal.
pub trait MetadataPrompt {
    fn request(&self, missing: &MissingFields) -> Result<PromptReply>;
}

/// Resolve one discovered file into a `MediaFile`, prompting through
/// `prompt` when metadata is missing (pass `None` for non-interactive runs).
pub fn resolve_file(
    path: &Path,
    prompt: Option<&dyn MetadataPrompt>,
    stats: &mut RunStats,
) -> Result<MediaFile> {
    let kind = FileKind::from_path(path);

    // Videos never get an embedded-metadata read; their capture time comes
    // straight from the filesystem.
    let exif_data = match kind {
        FileKind::Video => None,
        _ => {
            let data = exif::read_exif(path);
            if data.is_none() {
                stats.missing_exif += 1;
            }
            data
        }
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let fallback = exif::modification_time(path);
    let (camera, year, month) =
        resolve_metadata(&file_name, exif_data.as_ref(), fallback, prompt, stats)?;

    debug!(
        "{}: kind={:?} camera={:?} year={:?} month={:?}",
        path.display(),
        kind,
        camera,
        year,
        month
    );
    stats.record_camera(camera.as_deref().unwrap_or(UNKNOWN_CAMERA));

    Ok(MediaFile {
        path: path.to_path_buf(),
        kind,
        camera,
        year,
        month,
        stem: pairing_stem(path),
    })
}

/// The fallback policy itself, free of filesystem access. Capture time
/// preference: embedded original tag, embedded datetime tag (both already
/// folded into `ExifData::taken`), then the filesystem fallback, else absent.
fn resolve_metadata(
    file_name: &str,
    exif_data: Option<&ExifData>,
    fallback_time: Option<chrono::NaiveDateTime>,
    prompt: Option<&dyn MetadataPrompt>,
    stats: &mut RunStats,
) -> Result<(Option<String>, Option<i32>, Option<u32>)> {
    let mut camera = exif_data
        .and_then(|d| camera::normalize_camera_name(d.make.as_deref(), d.model.as_deref()));
    let taken = exif_data.and_then(|d| d.taken).or(fallback_time);
    let (mut year, mut month) = match taken {
        Some(dt) => (Some(dt.year()), Some(dt.month())),
        None => (None, None),
    };

    let camera_missing = camera.is_none();
    let date_missing = taken.is_none();
    if camera_missing || date_missing {
        match prompt {
            Some(prompt) => {
                let reply = prompt.request(&MissingFields {
                    file_name: file_name.to_string(),
                    camera: camera_missing,
                    date: date_missing,
                })?;
                if camera_missing {
                    let entered = reply.camera.trim();
                    if !entered.is_empty() {
                        // Operator-entered names are canonicalized too.
                        camera = camera::normalize_camera_name(Some(entered), None);
                    }
                }
                if date_missing {
                    year = parse_year(&reply.year);
                    month = parse_month(&reply.month);
                    if year.is_none() || month.is_none() {
                        stats.missing_date += 1;
                    }
                }
            }
            None => {
                if camera_missing {
                    stats.missing_camera += 1;
                }
                if date_missing {
                    stats.missing_date += 1;
                }
            }
        }
    }

    Ok((camera, year, month))
}

fn parse_year(input: &str) -> Option<i32> {
    input
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (1900..=2100).contains(year))
}

fn parse_month(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|month| (1..=12).contains(month))
}
