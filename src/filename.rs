//! File discovery that tolerates inconsistent Unicode composition in names.
//!
//! Files copied from macOS usually carry decomposed (NFD) Hangul in their names while
//! keywords typed elsewhere are composed (NFC). Both sides are brought to NFC before any
//! comparison, so the two spellings match.

use log::debug;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

/// NFC form of `text`.
pub fn canonical(text: &str) -> String {
    text.nfc().collect()
}

/// `true` when the canonical name contains the canonical keyword and ends with the
/// extension, ignoring case for the extension only.
pub fn matches(file_name: &str, keyword: &str, extension: &str) -> bool {
    let name = canonical(file_name);
    name.contains(&canonical(keyword))
        && name.to_lowercase().ends_with(&canonical(extension).to_lowercase())
}

/// First regular file directly under `directory` matching `keyword` and `extension`.
///
/// The listing is sorted by file name so repeated calls over the same directory pick the
/// same file. A missing or unreadable directory yields `None`.
pub fn find_file(directory: &Path, keyword: &str, extension: &str) -> Option<PathBuf> {
    if !directory.is_dir() {
        debug!("{} is not a directory; nothing to match", directory.display());
        return None;
    }

    let found = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .find(|entry| matches(&entry.file_name().to_string_lossy(), keyword, extension))
        .map(|entry| entry.into_path());

    match &found {
        Some(path) => debug!("Matched '{}' + '{}' to {}", keyword, extension, path.display()),
        None => debug!("No match for '{}' + '{}' in {}", keyword, extension, directory.display()),
    }
    found
}

/// Tries each keyword in order and returns the first hit along with the keyword used.
pub fn find_first<'k>(
    directory: &Path,
    keywords: &'k [String],
    extension: &str,
) -> Option<(PathBuf, &'k str)> {
    keywords
        .iter()
        .find_map(|keyword| find_file(directory, keyword, extension).map(|p| (p, keyword.as_str())))
}
