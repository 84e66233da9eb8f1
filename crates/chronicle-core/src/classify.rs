use std::path::Path;

/// Vendor RAW extensions (Canon, Nikon, Sony, Olympus, Fujifilm, Panasonic,
/// Adobe DNG, Pentax, Sigma, Hasselblad, Mamiya, Epson, Kodak, Leaf,
/// Minolta, generic, Leica, Samsung).
pub const RAW_EXTENSIONS: &[&str] = &[
    "cr2", "cr3", "nef", "nrw", "arw", "srf", "sr2", "orf", "raf", "rw2",
    "dng", "pef", "x3f", "3fr", "mef", "erf", "kdc", "dcr", "mos", "mrw",
    "raw", "rwl", "srw",
];

/// JPEG extensions, a subset of the photo set.
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "m4v", "mpg", "mpeg", "wmv", "flv", "webm",
    "3gp", "3g2", "mts", "m2ts", "vob", "ogv",
];

/// Processed photo formats recognized by discovery (JPEG included).
pub const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "heic", "tif", "tiff", "bmp", "gif",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Raw,
    Jpeg,
    Video,
    Other,
}

impl FileKind {
    /// Classify by extension alone, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = extension_lower(path) else {
            return FileKind::Other;
        };
        if RAW_EXTENSIONS.contains(&ext.as_str()) {
            FileKind::Raw
        } else if JPEG_EXTENSIONS.contains(&ext.as_str()) {
            FileKind::Jpeg
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            FileKind::Video
        } else {
            FileKind::Other
        }
    }

    /// Subfolder label used when a group separates file types.
    pub fn folder_name(self) -> &'static str {
        match self {
            FileKind::Raw => "RAW",
            FileKind::Jpeg => "JPG",
            FileKind::Video => "VIDEO",
            FileKind::Other => "OTHER",
        }
    }
}

/// Whether discovery should pick this file up at all. Anything outside the
/// photo/RAW/video sets is ignored before it can produce a record.
pub fn is_supported(path: &Path) -> bool {
    let Some(ext) = extension_lower(path) else {
        return false;
    };
    let ext = ext.as_str();
    PHOTO_EXTENSIONS.contains(&ext)
        || RAW_EXTENSIONS.contains(&ext)
        || VIDEO_EXTENSIONS.contains(&ext)
}

fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}
