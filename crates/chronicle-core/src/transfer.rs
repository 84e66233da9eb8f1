use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

use crate::checksum;
use crate::group::Group;
use crate::media::MediaFile;
use crate::planner;
use crate::stats::RunStats;
use crate::OrganizeOptions;

/// Place and transfer every grouped file. The checksum is taken from the
/// source before it moves; a hashing failure only costs the ledger entry,
/// never the transfer. Copy/move failures propagate - files already
/// transferred stay where they are (no rollback).
pub fn transfer_groups(
    groups: &[Group],
    files: &[MediaFile],
    options: &OrganizeOptions,
    stats: &mut RunStats,
) -> Result<()> {
    let total: usize = groups.iter().map(|g| g.members.len()).sum();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} {msg}")
            .unwrap(),
    );

    let mut created_dirs: HashSet<PathBuf> = HashSet::new();
    for group in groups {
        for &index in &group.members {
            let file = &files[index];
            let folder = planner::destination_folder(
                &options.destination,
                options.scheme,
                &group.key,
                options.month_format,
                group.separate_types,
                file.kind,
            );
            if created_dirs.insert(folder.clone()) {
                fs::create_dir_all(&folder)
                    .with_context(|| format!("Could not create {}", folder.display()))?;
            }

            let file_name = file
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("file");
            let target = planner::unique_target(&folder, file_name);

            match checksum::hash_file(&file.path) {
                Ok(digest) => {
                    if let Ok(relative) = target.strip_prefix(&options.destination) {
                        stats
                            .checksums
                            .insert(relative.display().to_string(), digest);
                    }
                }
                Err(e) => warn!("Checksum skipped for {}: {e}", file.path.display()),
            }

            if options.move_files {
                move_file(&file.path, &target)?;
            } else {
                copy_file(&file.path, &target)?;
            }

            stats.processed += 1;
            pb.inc(1);
            if stats.processed % 100 == 0 {
                pb.set_message(format!("{} files processed", stats.processed));
            }
        }
    }
    pb.finish_and_clear();
    Ok(())
}

/// Copy preserving the source modification time.
fn copy_file(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target).with_context(|| {
        format!(
            "Could not copy {} to {}",
            source.display(),
            target.display()
        )
    })?;
    if let Ok(metadata) = fs::metadata(source) {
        let mtime = FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(target, mtime).ok();
    }
    Ok(())
}

fn move_file(source: &Path, target: &Path) -> Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        // Rename does not cross filesystems; copy and remove instead.
        Err(_) => {
            copy_file(source, target)?;
            fs::remove_file(source).with_context(|| {
                format!("Could not remove {} after copying", source.display())
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_preserves_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src.jpg");
        let target = dir.path().join("dst.jpg");
        fs::write(&source, b"payload").unwrap();
        let stamp = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&source, stamp).unwrap();

        copy_file(&source, &target).unwrap();

        let copied = fs::metadata(&target).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&copied), stamp);
        assert!(source.exists());
    }

    #[test]
    fn test_move_removes_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src.jpg");
        let target = dir.path().join("dst.jpg");
        fs::write(&source, b"payload").unwrap();

        move_file(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&target).unwrap(), b"payload");
    }
}
