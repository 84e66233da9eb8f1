use std::collections::{HashMap, HashSet};

use crate::classify::FileKind;
use crate::media::{GroupKey, MediaFile};

/// Files sharing a (camera, year, month) key, in first-seen order.
#[derive(Debug)]
pub struct Group {
    pub key: GroupKey,
    /// Indices into the resolved file list, in discovery order
    pub members: Vec<usize>,
    /// Whether RAW/JPG/VIDEO subfolders apply to this group
    pub separate_types: bool,
}

/// Group resolved files by key and count RAW/JPEG sibling pairs. Pairing is
/// for the report only; it never moves a file. Groups come back in the order
/// their first member was discovered so placement stays reproducible.
pub fn group_files(files: &[MediaFile], separate_file_types: bool) -> (Vec<Group>, u64) {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut members: HashMap<GroupKey, Vec<usize>> = HashMap::new();
    for (index, file) in files.iter().enumerate() {
        let key = file.group_key();
        match members.get_mut(&key) {
            Some(list) => list.push(index),
            None => {
                order.push(key.clone());
                members.insert(key, vec![index]);
            }
        }
    }

    let mut pairs = 0u64;
    let mut groups = Vec::with_capacity(order.len());
    for key in order {
        let indices = members.remove(&key).unwrap_or_default();

        let mut kinds_present: HashSet<FileKind> = HashSet::new();
        let mut raw_stems: HashSet<&str> = HashSet::new();
        let mut jpeg_stems: HashSet<&str> = HashSet::new();
        for &index in &indices {
            let file = &files[index];
            kinds_present.insert(file.kind);
            match file.kind {
                FileKind::Raw => {
                    raw_stems.insert(file.stem.as_str());
                }
                FileKind::Jpeg => {
                    jpeg_stems.insert(file.stem.as_str());
                }
                _ => {}
            }
        }

        // A RAW and a JPEG pair when they share a stem inside one group; each
        // matched stem counts once.
        pairs += raw_stems.intersection(&jpeg_stems).count() as u64;

        let has_raw = kinds_present.contains(&FileKind::Raw);
        let has_jpeg = kinds_present.contains(&FileKind::Jpeg);
        let has_video = kinds_present.contains(&FileKind::Video);
        // Separation needs more than one type in the group; a lone type stays
        // flat even with the option on.
        let separate_types = separate_file_types
            && ((has_raw && has_jpeg) || has_video)
            && kinds_present.len() >= 2;

        groups.push(Group {
            key,
            members: indices,
            separate_types,
        });
    }

    (groups, pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, kind: FileKind, year: i32, month: u32) -> MediaFile {
        MediaFile {
            path: PathBuf::from(name),
            kind,
            camera: Some("Cam".to_string()),
            year: Some(year),
            month: Some(month),
            stem: crate::media::pairing_stem(std::path::Path::new(name)),
        }
    }

    #[test]
    fn test_pair_counted_once_with_video_bystander() {
        let files = vec![
            file("a.cr2", FileKind::Raw, 2024, 3),
            file("A.JPG", FileKind::Jpeg, 2024, 3),
            file("a.mp4", FileKind::Video, 2024, 3),
        ];
        let (groups, pairs) = group_files(&files, false);
        assert_eq!(groups.len(), 1);
        assert_eq!(pairs, 1);
    }

    #[test]
    fn test_pair_requires_same_group() {
        let files = vec![
            file("a.cr2", FileKind::Raw, 2024, 3),
            file("a.jpg", FileKind::Jpeg, 2024, 4),
        ];
        let (groups, pairs) = group_files(&files, false);
        assert_eq!(groups.len(), 2);
        assert_eq!(pairs, 0);
    }

    #[test]
    fn test_separation_rules() {
        // RAW + JPEG together: separates.
        let (groups, _) = group_files(
            &[
                file("a.cr2", FileKind::Raw, 2024, 3),
                file("b.jpg", FileKind::Jpeg, 2024, 3),
            ],
            true,
        );
        assert!(groups[0].separate_types);

        // Only JPEGs: never separates.
        let (groups, _) = group_files(
            &[
                file("a.jpg", FileKind::Jpeg, 2024, 3),
                file("b.jpg", FileKind::Jpeg, 2024, 3),
            ],
            true,
        );
        assert!(!groups[0].separate_types);

        // A video alongside photos: separates.
        let (groups, _) = group_files(
            &[
                file("a.jpg", FileKind::Jpeg, 2024, 3),
                file("b.mp4", FileKind::Video, 2024, 3),
            ],
            true,
        );
        assert!(groups[0].separate_types);

        // Only videos: still a single type, stays flat.
        let (groups, _) = group_files(&[file("a.mp4", FileKind::Video, 2024, 3)], true);
        assert!(!groups[0].separate_types);

        // Option off: never separates.
        let (groups, _) = group_files(
            &[
                file("a.cr2", FileKind::Raw, 2024, 3),
                file("b.jpg", FileKind::Jpeg, 2024, 3),
                file("c.mp4", FileKind::Video, 2024, 3),
            ],
            false,
        );
        assert!(!groups[0].separate_types);
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let files = vec![
            file("late.jpg", FileKind::Jpeg, 2024, 4),
            file("early.jpg", FileKind::Jpeg, 2024, 3),
            file("late2.jpg", FileKind::Jpeg, 2024, 4),
        ];
        let (groups, _) = group_files(&files, false);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key.month, Some(4));
        assert_eq!(groups[0].members, vec![0, 2]);
        assert_eq!(groups[1].key.month, Some(3));
    }
}
