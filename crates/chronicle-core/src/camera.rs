use std::sync::LazyLock;

use regex::Regex;

/// Corporate-suffix noise stripped from make/model fields before anything
/// else. Order matters: "Inc." must go before "Inc".
const NOISE_TOKENS: &[&str] = &["Corporation", "Inc.", "Inc", "Company", "Ltd.", "Ltd"];

/// Brand words kept in their canonical capitalization (matched
/// case-insensitively).
const BRAND_TOKENS: &[&str] = &[
    "iphone", "ipad", "dji", "gopro", "sony", "canon", "nikon", "fujifilm",
    "olympus", "panasonic", "pentax", "leica", "hasselblad",
];

/// Substring aliases that shorten recognizable model codes. First match wins;
/// unmatched models pass through unchanged. Best-effort, not a registry.
const MODEL_ALIASES: &[(&str, &str)] = &[
    ("ILCE_7M3", "A7III"),
    ("ILCE_7M4", "A7IV"),
    ("ILCE_7RM3", "A7RIII"),
    ("ILCE_7RM4", "A7RIV"),
    ("ILCE_7RM5", "A7RV"),
    ("ILCE_9", "A9"),
    ("ILCE_1", "A1"),
];

static IPHONE_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iphone.*\d").unwrap());

/// Map raw EXIF make/model strings to a canonical, filesystem-safe camera
/// label. Returns `None` when neither field survives cleaning; the
/// `UnknownCamera` sentinel is rendered at path-construction time, not here.
/// Idempotent: feeding a returned label back in returns it unchanged.
pub fn normalize_camera_name(make: Option<&str>, model: Option<&str>) -> Option<String> {
    let make = make.map(clean_component).filter(|s| !s.is_empty());
    let model = model
        .map(clean_component)
        .filter(|s| !s.is_empty())
        .map(|m| apply_model_alias(&m));

    match (make, model) {
        (Some(make), Some(model)) => {
            // Avoid super-redundant names like "Nikon_Nikon_D5300".
            if model.to_lowercase().starts_with(&make.to_lowercase()) {
                Some(model)
            } else {
                Some(format!("{make}_{model}"))
            }
        }
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

/// Strip noise, fold separators to underscores, and fix word capitalization.
fn clean_component(raw: &str) -> String {
    let mut s = raw.trim().to_string();
    for noise in NOISE_TOKENS {
        s = s.replace(noise, "");
    }
    for sep in [' ', '/', '\\', '-'] {
        s = s.replace(sep, "_");
    }
    // Splitting on underscores and dropping empties collapses runs and trims
    // the edges in one go.
    s.split('_')
        .filter(|word| !word.is_empty())
        .map(normalize_word)
        .collect::<Vec<_>>()
        .join("_")
}

fn normalize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if BRAND_TOKENS.contains(&lower.as_str()) {
        return titlecase(word);
    }
    // Sony model-number prefixes stay fully upper-cased.
    if lower.starts_with("ilce") || lower.starts_with("dsc") {
        return word.to_uppercase();
    }
    let has_upper = word.chars().any(char::is_uppercase);
    let has_lower = word.chars().any(char::is_lowercase);
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    // Model codes like D5300 or A7III and already-mixed words are left alone;
    // everything else gets standard capitalization.
    if (has_upper && !has_lower && has_digit) || (has_upper && has_lower) {
        word.to_string()
    } else {
        titlecase(word)
    }
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn apply_model_alias(model: &str) -> String {
    let upper = model.to_uppercase();
    for (pattern, alias) in MODEL_ALIASES {
        if upper.contains(pattern) {
            return (*alias).to_string();
        }
    }
    if upper.contains("MAVIC") {
        if upper.contains('3') {
            return "Mavic3".to_string();
        }
        if upper.contains('2') {
            return "Mavic2".to_string();
        }
    }
    if upper.contains("IPHONE") {
        // Compact forms like "iPhone12" carry the model number in one token;
        // take the first such token alone.
        if let Some(token) = model.split('_').find(|t| IPHONE_MODEL.is_match(t)) {
            return token.to_string();
        }
    }
    model.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_absent() {
        assert_eq!(normalize_camera_name(None, None), None);
        assert_eq!(normalize_camera_name(Some("  "), Some("")), None);
    }

    #[test]
    fn test_sony_alias_without_duplicate_brand() {
        let name = normalize_camera_name(Some("SONY"), Some("ILCE-7M3")).unwrap();
        assert_eq!(name, "Sony_A7III");
    }

    #[test]
    fn test_model_only_nikon() {
        let name = normalize_camera_name(None, Some("NIKON D5300")).unwrap();
        assert_eq!(name, "Nikon_D5300");
    }

    #[test]
    fn test_redundant_make_collapsed() {
        let name = normalize_camera_name(Some("Nikon"), Some("NIKON D5300")).unwrap();
        assert_eq!(name, "Nikon_D5300");
    }

    #[test]
    fn test_corporate_noise_stripped() {
        let name = normalize_camera_name(Some("Canon Inc."), Some("EOS 5D")).unwrap();
        assert_eq!(name, "Canon_Eos_5D");
    }

    #[test]
    fn test_apple_iphone_passthrough() {
        let name = normalize_camera_name(Some("Apple"), Some("iPhone 14 Pro")).unwrap();
        assert_eq!(name, "Apple_Iphone_14_Pro");
    }

    #[test]
    fn test_iphone_compact_token() {
        let name = normalize_camera_name(Some("Apple"), Some("iPhone12")).unwrap();
        assert_eq!(name, "Apple_iPhone12");
    }

    #[test]
    fn test_mavic_aliases() {
        assert_eq!(
            normalize_camera_name(Some("DJI"), Some("Mavic 3 Classic")).unwrap(),
            "Dji_Mavic3"
        );
        assert_eq!(
            normalize_camera_name(Some("DJI"), Some("MAVIC 2 PRO")).unwrap(),
            "Dji_Mavic2"
        );
    }

    #[test]
    fn test_unaliased_sony_model_keeps_prefix_case() {
        let name = normalize_camera_name(Some("SONY"), Some("ILCE-6400")).unwrap();
        assert_eq!(name, "Sony_ILCE_6400");
    }

    #[test]
    fn test_separators_folded() {
        let name = normalize_camera_name(None, Some("some/odd\\model - x")).unwrap();
        assert_eq!(name, "Some_Odd_Model_X");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            (Some("SONY"), Some("ILCE-7M3")),
            (Some("SONY"), Some("ILCE-6400")),
            (None, Some("NIKON D5300")),
            (Some("Apple"), Some("iPhone 14 Pro")),
            (Some("Apple"), Some("iPhone12")),
            (Some("DJI"), Some("Mavic 3 Classic")),
            (Some("Canon Inc."), Some("EOS 5D")),
        ];
        for (make, model) in inputs {
            let once = normalize_camera_name(make, model).unwrap();
            let twice = normalize_camera_name(Some(once.as_str()), None).unwrap();
            assert_eq!(twice, once, "not idempotent for {make:?}/{model:?}");
        }
    }
}
