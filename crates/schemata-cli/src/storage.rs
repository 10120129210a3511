//! Host-side document persistence.
//!
//! The engine never touches the wire format; the host owns import/export.
//! Documents live on disk as flat JSON block lists, the same shape the
//! engine's model types serialize to.

use anyhow::{Context, Result};
use schemata_engine::editing::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Scan the documents directory for `.json` documents, sorted by path
pub fn scan_documents(documents_root: &Path) -> Result<Vec<PathBuf>> {
    if !documents_root.is_dir() {
        anyhow::bail!(
            "documents directory not found: {}",
            documents_root.display()
        );
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(documents_root)
        .with_context(|| format!("reading {}", documents_root.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document = serde_json::from_str(&content)
        .with_context(|| format!("parsing document {}", path.display()))?;
    Ok(document)
}

pub fn save_document(path: &Path, document: &Document) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
