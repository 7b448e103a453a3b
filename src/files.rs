//! Directory scanning and text decoding of input files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::Result;

/// Returns the regular files in `dir` whose name ends with `suffix`, sorted by name.
pub fn list_files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));

        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Detects the encoding of a file's bytes. A byte order mark wins over the guess.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Reads a file and decodes it to text, replacing malformed sequences.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    let (text, _, had_errors) = encoding.decode(&bytes);

    if had_errors {
        tracing::debug!(
            "Replaced malformed {} sequences in {}",
            encoding.name(),
            path.display()
        );
    }

    Ok(text.into_owned())
}

// -- Tests -------------------------------------------------------------------
