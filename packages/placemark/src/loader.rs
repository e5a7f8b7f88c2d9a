//! Document loading.
//!
//! Reads a KML file as UTF-8 and parses it into a [`roxmltree::Document`].
//! When parsing fails, every Unicode "other" (`C*` category) character
//! except tab, newline and carriage return is stripped and parsing is
//! retried exactly once.

use std::borrow::Cow;
use std::path::Path;

use roxmltree::{Document, ParsingOptions};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::KmlError;

/// Reads `path` into memory, dropping a leading byte-order mark.
///
/// # Errors
///
/// * [`KmlError::MissingFile`] if `path` does not exist
/// * [`KmlError::Io`] if the file cannot be read as UTF-8
pub fn read_document(path: &Path) -> Result<String, KmlError> {
    if !path.exists() {
        return Err(KmlError::MissingFile(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|e| KmlError::io(path, e))?;
    log::debug!("Read {} bytes from {}", text.len(), path.display());

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Parses `text` and runs `f` over the resulting document.
///
/// # Errors
///
/// Returns [`KmlError::Xml`] if the document is still malformed after
/// control characters have been stripped.
pub fn with_document<T>(text: &str, f: impl FnOnce(&Document<'_>) -> T) -> Result<T, KmlError> {
    match parse(text) {
        Ok(doc) => Ok(f(&doc)),
        Err(e) => {
            log::warn!("Failed to parse KML ({e}), retrying with control characters removed");
            let cleaned = strip_control_chars(text);
            let doc = parse(&cleaned)?;
            Ok(f(&doc))
        }
    }
}

/// Copies `fallback` onto `input` when `input` is missing and `fallback`
/// exists, creating parent directories as needed.
///
/// Returns `true` if a copy was made.
///
/// # Errors
///
/// Returns [`KmlError::Io`] if the directories cannot be created or the
/// copy fails.
pub fn copy_fallback_input(input: &Path, fallback: &Path) -> Result<bool, KmlError> {
    if input.exists() || !fallback.exists() {
        return Ok(false);
    }

    log::info!(
        "File '{}' not found. Copying '{}' to it.",
        input.display(),
        fallback.display()
    );

    if let Some(parent) = input.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KmlError::io(parent, e))?;
    }
    std::fs::copy(fallback, input).map_err(|e| KmlError::io(input, e))?;

    Ok(true)
}

fn parse(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// Removes control, format, private-use and unassigned characters
/// (general categories `Cc`, `Cf`, `Co`, `Cn`), keeping `\t`, `\n` and
/// `\r`.
#[must_use]
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(keep_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| keep_char(c)).collect())
    }
}

fn keep_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || !matches!(
            get_general_category(c),
            GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::PrivateUse
                | GeneralCategory::Surrogate
                | GeneralCategory::Unassigned
        )
}
