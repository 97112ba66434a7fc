//! Reads PDF documents from disk into `UploadedFile`s.

use std::path::Path;

use researchgraph::UploadedFile;

use crate::config::Error;

/// Reads every path into memory, keeping the file name (not the full path) as the
/// document name. A missing or unreadable file fails the whole load; nothing is run
/// on a partial set.
pub fn load_pdf_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<UploadedFile>, Error> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            tracing::warn!(path = %path.display(), "file does not have a .pdf extension");
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(UploadedFile::new(name, bytes));
    }
    Ok(files)
}
