//! Loading paper text from disk.

use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Read the full text of a paper.
///
/// PDFs go through `pdf-extract`; a PDF whose text cannot be extracted
/// yields an empty document rather than an error. Anything else is read as
/// UTF-8 text.
pub fn load_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CliError::Document(format!("{}: {}", path.display(), e)))?;

    let text = if is_pdf(path) {
        match pdf_extract::extract_text_from_mem(&bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not extract text from {}: {}", path.display(), e);
                String::new()
            }
        }
    } else {
        String::from_utf8(bytes)
            .map_err(|e| CliError::Document(format!("{}: not valid UTF-8 ({})", path.display(), e)))?
    };

    info!("Loaded {} ({} chars)", path.display(), text.len());
    Ok(text)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
