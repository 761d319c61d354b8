//! Discovery of coverage files and derivation of output prefixes.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use tracing::debug;

use crate::utils::formats::is_coverage_file_name;
use crate::utils::formats::strip_known_extensions;
use crate::utils::formats::COVERAGE_FILE_SUFFIXES;

/// Finds all coverage files directly within `dir` (non-recursive, following
/// symlinks, skipping hidden files), sorted by path.
pub fn find_coverage_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading input directory: {}", dir.display()))?;

    let mut files = Vec::new();

    for entry in entries {
        let entry =
            entry.with_context(|| format!("reading directory entry in {}", dir.display()))?;
        let path = entry.path();

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if name.starts_with('.') || !is_coverage_file_name(name) {
            debug!("  [*] Ignoring {}.", path.display());
            continue;
        }

        let metadata =
            fs::metadata(&path).with_context(|| format!("accessing {}", path.display()))?;

        if metadata.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        bail!(
            "directory contains no coverage files: {}. Expected file names ending with: {}",
            dir.display(),
            COVERAGE_FILE_SUFFIXES.join(", ")
        );
    }

    files.sort();
    Ok(files)
}

/// Derives the output prefix for `src`: its file name without known
/// extensions, joined to `prefix` with an underscore when one is given.
///
/// ```
/// use std::path::Path;
/// use exoncov::report::inputs::derive_prefix;
///
/// let src = Path::new("runs/NA12878_sambamba_output.tsv");
/// assert_eq!(derive_prefix(src, None), "NA12878_sambamba_output");
/// assert_eq!(derive_prefix(src, Some("panel")), "panel_NA12878_sambamba_output");
/// ```
pub fn derive_prefix(src: &Path, prefix: Option<&str>) -> String {
    let name = src
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| src.to_string_lossy());
    let stem = strip_known_extensions(&name);

    match prefix {
        Some(p) if !p.is_empty() => format!("{}_{}", p, stem),
        _ => stem.to_string(),
    }
}
