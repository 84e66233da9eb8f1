use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};

/// Capture facts read from an embedded EXIF block.
#[derive(Debug, Clone, Default)]
pub struct ExifData {
    pub taken: Option<NaiveDateTime>,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// Read the EXIF block of an image file. Returns `None` when the file has no
/// readable block at all (corrupt file, unsupported container, no tag
/// dictionary) - that case feeds the missing-EXIF statistic. Individual
/// missing or unparseable tags inside a readable block just come back as
/// `None` fields. Never propagates an error.
pub fn read_exif(path: &Path) -> Option<ExifData> {
    let file = File::open(path).ok()?;
    let exif = Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .ok()?;

    // EXIF datetimes have no timezone info - they are local time as-is.
    let taken = [Tag::DateTimeOriginal, Tag::DateTime].iter().find_map(|tag| {
        let field = exif.get_field(*tag, In::PRIMARY)?;
        parse_exif_datetime(&field.display_value().to_string())
    });

    Some(ExifData {
        taken,
        make: field_text(&exif, Tag::Make),
        model: field_text(&exif, Tag::Model),
    })
}

/// Filesystem modification time as a local naive datetime.
pub fn modification_time(path: &Path) -> Option<NaiveDateTime> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(chrono::DateTime::<chrono::Local>::from(modified).naive_local())
}

/// Parse the fixed `YYYY:MM:DD HH:MM:SS` EXIF pattern. Some writers use other
/// separators, so those are folded to colons first; anything that still does
/// not parse is treated as absent.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s
        .replace('-', ":")
        .replace('/', ":")
        .replace('\\', ":")
        .replace('.', ":");

    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    // Date-only values show up in the wild; midnight them.
    if let Ok(d) = chrono::NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d") {
        return Some(d.and_hms_opt(0, 0, 0)?);
    }

    None
}

fn field_text(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = match &field.value {
        // Make/Model arrive as raw ASCII bytes; decode leniently, dropping
        // anything undecodable, and strip the NUL padding cameras leave in.
        Value::Ascii(lines) => lines
            .iter()
            .map(|bytes| lenient_decode(bytes))
            .collect::<Vec<_>>()
            .join(" "),
        _ => field.display_value().to_string(),
    };
    let text = text.trim_matches(char::from(0)).trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn lenient_decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_exif_datetime() {
        let dt = parse_exif_datetime("2021:07:04 10:20:30").unwrap();
        assert_eq!(dt.to_string(), "2021-07-04 10:20:30");
    }

    #[test]
    fn test_parse_alternate_separators() {
        assert!(parse_exif_datetime("2021-07-04 10:20:30").is_some());
        assert!(parse_exif_datetime("2021/07/04 10:20:30").is_some());
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_exif_datetime("2021:07:04").unwrap();
        assert_eq!(dt.to_string(), "2021-07-04 00:00:00");
    }

    #[test]
    fn test_parse_garbage_is_absent() {
        assert!(parse_exif_datetime("").is_none());
        assert!(parse_exif_datetime("not a date").is_none());
        assert!(parse_exif_datetime("2021:13:40 99:99:99").is_none());
    }

    #[test]
    fn test_lenient_decode_drops_bad_bytes() {
        assert_eq!(lenient_decode(b"SONY"), "SONY");
        assert_eq!(lenient_decode(b"SO\xffNY"), "SONY");
    }

    #[test]
    fn test_read_exif_on_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        assert!(read_exif(&path).is_none());
    }
}
