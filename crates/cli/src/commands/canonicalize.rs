use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use complexity_canonical::Canonicalizer;

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Canonical form of each file, separated by a blank line.
pub fn render(files: &[PathBuf]) -> Result<String> {
    let mut canonicalizer = Canonicalizer::new()?;
    let mut blocks = Vec::with_capacity(files.len());
    for path in files {
        let canonical = canonicalizer
            .canonicalize(&read(path)?)
            .with_context(|| format!("{} is not valid Python", path.display()))?;
        blocks.push(canonical);
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    Ok(out)
}

/// Whether exactly two files are structurally identical.
pub fn check(files: &[PathBuf]) -> Result<bool> {
    let [a, b] = files else {
        bail!("--check takes exactly two files, got {}", files.len());
    };
    let mut canonicalizer = Canonicalizer::new()?;
    let equal = canonicalizer
        .structurally_equal(&read(a)?, &read(b)?)
        .context("Failed to compare sources")?;
    Ok(equal)
}
