use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use walkdir::WalkDir;

use crate::error::FlashgenError;
use crate::sanitize::{repair_line, CSV_EXTENSION};

/// Rewrites every `.csv` file under `root` so that each line keeps only its
/// first delimiter, and returns the files it rewrote. The first I/O error
/// stops the walk.
///
/// Line endings are written back exactly as found: `\r\n` stays `\r\n` and a
/// last line without a newline gets none added.
pub fn repair_csv_tree(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(FlashgenError::NotADirectory(root.to_path_buf()).into());
    }

    let mut repaired = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk '{}'", root.display()))?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(CSV_EXTENSION));
        if !entry.file_type().is_file() || !is_csv {
            continue;
        }

        info!("Fixing: {}", path.display());
        repair_file(path)?;
        repaired.push(path.to_path_buf());
    }

    info!("All CSV files processed.");
    Ok(repaired)
}

fn repair_file(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    let mut fixed = String::with_capacity(contents.len());
    // "\r\n" comes through as "...\r" followed by a bare "\n" piece
    for raw in contents.split_inclusive(['\n', '\r']) {
        let line = raw.trim_end_matches(['\n', '\r']);
        fixed.push_str(&repair_line(line));
        fixed.push_str(&raw[line.len()..]);
    }

    fs::write(path, fixed).with_context(|| format!("failed to write '{}'", path.display()))
}
