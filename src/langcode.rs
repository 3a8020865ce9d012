// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language codes: derivation from resource file names and display metadata.
//!
//! Codes are whatever the file stem says (`en.json` -> `en`). They are not
//! required to be ISO 639-1; [`is_iso639_1`] only feeds the `doctor` warnings.

use std::path::Path;

/// Resource file extensions the catalog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Json,
    Yaml,
}

impl ResourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(ResourceFormat::Json)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(ResourceFormat::Yaml)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceFormat::Json => "JSON",
            ResourceFormat::Yaml => "YAML",
        }
    }
}

/// Language code for a resource file, taken from its stem.
///
/// Returns `None` for unsupported extensions, hidden files and stems that
/// are empty or contain a dot (`en.backup.json`).
pub fn code_from_path(path: &Path) -> Option<String> {
    ResourceFormat::from_path(path)?;
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || stem.starts_with('.') || stem.contains('.') {
        return None;
    }
    Some(stem.to_string())
}

/// Whether the primary subtag of `code` is an ISO 639-1 code.
///
/// Region suffixes are ignored, so `pt-BR` and `pt_BR` both pass.
pub fn is_iso639_1(code: &str) -> bool {
    let primary = code.split(['-', '_']).next().unwrap_or_default();
    primary.len() == 2 && ISO_639_1.binary_search(&primary).is_ok()
}

/// English name for common codes, used by `languages` listings.
pub fn english_name(code: &str) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(c, _, _)| *c == primary_subtag(code))
        .map(|(_, english, _)| *english)
}

/// Name of the language written in its own script.
pub fn native_name(code: &str) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(c, _, _)| *c == primary_subtag(code))
        .map(|(_, _, native)| *native)
}

fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

// (code, English, native)
const NAMES: &[(&str, &str, &str)] = &[
    ("ar", "Arabic", "العربية"),
    ("de", "German", "Deutsch"),
    ("en", "English", "English"),
    ("es", "Spanish", "Español"),
    ("fr", "French", "Français"),
    ("it", "Italian", "Italiano"),
    ("ja", "Japanese", "日本語"),
    ("ko", "Korean", "한국어"),
    ("nl", "Dutch", "Nederlands"),
    ("pl", "Polish", "Polski"),
    ("pt", "Portuguese", "Português"),
    ("ru", "Russian", "Русский"),
    ("tr", "Turkish", "Türkçe"),
    ("uk", "Ukrainian", "Українська"),
    ("zh", "Chinese", "中文"),
];

// Sorted for binary search.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_table_is_sorted() {
        assert!(ISO_639_1.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn code_comes_from_file_stem() {
        assert_eq!(code_from_path(Path::new("i18n/tr.json")), Some("tr".to_string()));
        assert_eq!(code_from_path(Path::new("i18n/ko.yml")), Some("ko".to_string()));
        assert_eq!(code_from_path(Path::new("i18n/pt-BR.YAML")), Some("pt-BR".to_string()));
    }

    #[test]
    fn unsupported_files_have_no_code() {
        assert_eq!(code_from_path(Path::new("i18n/README.md")), None);
        assert_eq!(code_from_path(Path::new("i18n/en.backup.json")), None);
        assert_eq!(code_from_path(Path::new("i18n/.json")), None);
        assert_eq!(code_from_path(Path::new("i18n/translations.py")), None);
    }

    #[test]
    fn iso_check_ignores_region() {
        assert!(is_iso639_1("en"));
        assert!(is_iso639_1("pt-BR"));
        assert!(is_iso639_1("zh_TW"));
        assert!(!is_iso639_1("xx"));
        assert!(!is_iso639_1("eng"));
        assert!(!is_iso639_1("EN"));
        assert!(!is_iso639_1(""));
    }

    #[test]
    fn display_names() {
        assert_eq!(english_name("tr"), Some("Turkish"));
        assert_eq!(native_name("ko"), Some("한국어"));
        assert_eq!(native_name("pt-BR"), Some("Português"));
        assert_eq!(english_name("xx"), None);
    }
}
