use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::sanitize::CSV_EXTENSION;

/// Concatenates the non-blank lines of every `.csv` file directly inside
/// `input_dir`, in file name order, into `output`. Returns the total line count.
pub fn merge_csv_files(input_dir: &Path, output: &Path) -> Result<usize> {
    let inputs = list_csv_files(input_dir, output)?;

    let file = File::create(output)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    let mut writer = BufWriter::new(file);
    let mut total = 0;

    for path in inputs {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;

        let mut lines = 0;
        for line in contents.split(['\n', '\r']).filter(|l| !l.trim().is_empty()) {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            lines += 1;
        }

        info!("{}: {} questions copied", path.display(), lines);
        total += lines;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write '{}'", output.display()))?;
    info!("Total questions copied: {}", total);
    Ok(total)
}

fn list_csv_files(input_dir: &Path, output: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read directory '{}'", input_dir.display()))?;
    let output = fs::canonicalize(output).ok();

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(CSV_EXTENSION) {
            continue;
        }
        if output.is_some() && fs::canonicalize(&path).ok() == output {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
