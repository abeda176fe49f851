use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn ledgerlift_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ledgerlift"))
}

pub fn ensure_ledgerlift_home() -> Result<PathBuf> {
    let dir = ledgerlift_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Where exports go when neither the flag nor the config names a directory.
pub fn default_results_dir() -> Result<PathBuf> {
    Ok(ledgerlift_home()?.join("results"))
}

/// Display name for a document path (file name only).
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_name() {
        assert_eq!(document_name(Path::new("/tmp/stmts/april.pdf")), "april.pdf");
        assert_eq!(document_name(Path::new("april.pdf")), "april.pdf");
    }
}
