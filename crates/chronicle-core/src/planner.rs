use std::path::{Path, PathBuf};

use crate::classify::FileKind;
use crate::media::GroupKey;
use crate::{MonthFormat, OrganizeScheme};

/// Base destination folder for a group under the active organization scheme.
pub fn base_folder(
    destination: &Path,
    scheme: OrganizeScheme,
    key: &GroupKey,
    month_format: MonthFormat,
) -> PathBuf {
    let camera = key.camera_label();
    let year = key.year_label();
    let month = key.month_label(month_format);
    match scheme {
        OrganizeScheme::CameraYearMonth => destination.join(camera).join(year).join(month),
        OrganizeScheme::YearMonth => destination.join(year).join(month),
        OrganizeScheme::YearMonthCamera => destination.join(year).join(month).join(camera),
    }
}

/// Full destination folder for one file: the group's base folder plus a
/// type-named subfolder when the group separates. OTHER files never get a
/// subfolder.
pub fn destination_folder(
    destination: &Path,
    scheme: OrganizeScheme,
    key: &GroupKey,
    month_format: MonthFormat,
    separate_types: bool,
    kind: FileKind,
) -> PathBuf {
    let base = base_folder(destination, scheme, key, month_format);
    if separate_types && matches!(kind, FileKind::Raw | FileKind::Jpeg | FileKind::Video) {
        base.join(kind.folder_name())
    } else {
        base
    }
}

/// Find a collision-free name inside `folder`, probing the live filesystem:
/// the unmodified name first, then `_1`, `_2`, ... before the extension.
pub fn unique_target(folder: &Path, file_name: &str) -> PathBuf {
    let target = folder.join(file_name);
    if !target.exists() {
        return target;
    }

    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = Path::new(file_name).extension().and_then(|s| s.to_str());

    let mut counter = 1u32;
    loop {
        let candidate_name = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = folder.join(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn key(camera: &str, year: i32, month: u32) -> GroupKey {
        GroupKey {
            camera: Some(camera.to_string()),
            year: Some(year),
            month: Some(month),
        }
    }

    #[test]
    fn test_scheme_layouts() {
        let dest = Path::new("/out");
        let key = key("Sony_A7III", 2024, 3);
        assert_eq!(
            base_folder(dest, OrganizeScheme::CameraYearMonth, &key, MonthFormat::Full),
            Path::new("/out/Sony_A7III/2024/03 - March")
        );
        assert_eq!(
            base_folder(dest, OrganizeScheme::YearMonth, &key, MonthFormat::Number),
            Path::new("/out/2024/03")
        );
        assert_eq!(
            base_folder(dest, OrganizeScheme::YearMonthCamera, &key, MonthFormat::Number),
            Path::new("/out/2024/03/Sony_A7III")
        );
    }

    #[test]
    fn test_sentinel_folders() {
        let dest = Path::new("/out");
        let key = GroupKey {
            camera: None,
            year: None,
            month: None,
        };
        assert_eq!(
            base_folder(dest, OrganizeScheme::CameraYearMonth, &key, MonthFormat::Full),
            Path::new("/out/UnknownCamera/UnknownYear/UnknownMonth")
        );
    }

    #[test]
    fn test_type_subfolders() {
        let dest = Path::new("/out");
        let key = key("Cam", 2024, 3);
        let folder = destination_folder(
            dest,
            OrganizeScheme::YearMonth,
            &key,
            MonthFormat::Number,
            true,
            FileKind::Raw,
        );
        assert_eq!(folder, Path::new("/out/2024/03/RAW"));

        // OTHER files are never separated.
        let folder = destination_folder(
            dest,
            OrganizeScheme::YearMonth,
            &key,
            MonthFormat::Number,
            true,
            FileKind::Other,
        );
        assert_eq!(folder, Path::new("/out/2024/03"));

        // No separation, no subfolder.
        let folder = destination_folder(
            dest,
            OrganizeScheme::YearMonth,
            &key,
            MonthFormat::Number,
            false,
            FileKind::Video,
        );
        assert_eq!(folder, Path::new("/out/2024/03"));
    }

    #[test]
    fn test_unique_target_probes_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            unique_target(dir.path(), "IMG_0001.jpg"),
            dir.path().join("IMG_0001.jpg")
        );

        fs::write(dir.path().join("IMG_0001.jpg"), b"x").unwrap();
        assert_eq!(
            unique_target(dir.path(), "IMG_0001.jpg"),
            dir.path().join("IMG_0001_1.jpg")
        );

        fs::write(dir.path().join("IMG_0001_1.jpg"), b"x").unwrap();
        assert_eq!(
            unique_target(dir.path(), "IMG_0001.jpg"),
            dir.path().join("IMG_0001_2.jpg")
        );
    }

    #[test]
    fn test_unique_target_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("clip"), b"x").unwrap();
        assert_eq!(unique_target(dir.path(), "clip"), dir.path().join("clip_1"));
    }
}
