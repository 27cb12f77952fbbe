use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Upper bound on the ` (N)` disambiguator before giving up.
const MAX_DISAMBIGUATOR: u32 = 10_000;

/// Returns `candidate` if it does not exist, otherwise the first free
/// `name (N).ext` with `N` counting up from 1.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use lingo::core::unique_path::unique_path_with;
///
/// let taken = [Path::new("out/output.json"), Path::new("out/output (1).json")];
/// let path = unique_path_with(Path::new("out/output.json"), |p| taken.contains(&p)).unwrap();
/// assert_eq!(path, Path::new("out/output (2).json"));
/// ```
pub fn unique_path(candidate: impl AsRef<Path>) -> Result<PathBuf> {
    unique_path_with(candidate.as_ref(), |path| path.exists())
}

/// [`unique_path`] with an injectable existence check.
pub fn unique_path_with(candidate: &Path, exists: impl Fn(&Path) -> bool) -> Result<PathBuf> {
    let Some(stem) = candidate.file_stem() else {
        bail!("Cannot derive a file name from '{}'.", candidate.display());
    };

    if !exists(candidate) {
        return Ok(candidate.to_path_buf());
    }

    let stem = stem.to_string_lossy();
    let extension = candidate.extension().map(|ext| ext.to_string_lossy());

    for counter in 1..=MAX_DISAMBIGUATOR {
        let file_name = match &extension {
            Some(ext) => format!("{} ({}).{}", stem, counter, ext),
            None => format!("{} ({})", stem, counter),
        };
        let path = candidate.with_file_name(file_name);
        if !exists(&path) {
            return Ok(path);
        }
    }

    bail!(
        "No free file name found for '{}' after {} attempts.",
        candidate.display(),
        MAX_DISAMBIGUATOR
    )
}
