use crate::cli::SortBy;
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Lists the files directly inside `dir` whose name ends with one of
/// `extensions` (ignoring case), ordered by `sort`.
///
/// Subdirectories are not entered. Hidden and git-ignored files are
/// candidates like any other.
pub fn find_files(
    dir: &Path,
    extensions: &[&str],
    sort: SortBy,
) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let extensions: Vec<String> = extensions.iter().map(|ext| ext.to_lowercase()).collect();

    // Enumerating by name only fixes the order of ties in `sort_files`.
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        // Depth 0 is the directory itself.
        if entry.depth() == 0 || !path.is_file() {
            continue;
        }

        if matches_extension(path, &extensions) {
            files.push(path.to_path_buf());
        }
    }

    sort_files(&mut files, sort);
    debug!("Selected {} file(s) in {}", files.len(), dir.display());

    Ok(files)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let name = file_name(path).to_lowercase();
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The suffix from the last `.` of the file name, dot included. A name
/// made of only a dot and an extension (`.py`) counts as that extension;
/// a name without a dot, or ending in one, has none.
fn extension_key(path: &Path) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx..].to_string(),
        _ => String::new(),
    }
}

/// Orders files by extension for `SortBy::Type`, by file name otherwise.
/// The sort is stable, so files sharing an extension keep their relative order.
pub fn sort_files(files: &mut [PathBuf], sort: SortBy) {
    match sort {
        SortBy::Type => files.sort_by_cached_key(|path| extension_key(path)),
        SortBy::Name => files.sort_by_cached_key(|path| file_name(path)),
    }
}
