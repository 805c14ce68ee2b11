use crate::cli::{BundleArgs, Language, SortBy};
use anyhow::Context;
use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

/// Validated settings for one `bundle` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    pub output: PathBuf,
    pub languages: Vec<Language>,
    pub include_note: bool,
    pub sort: SortBy,
    pub author: Option<String>,
    pub remove_empty_lines: bool,
}

impl From<BundleArgs> for BundleOptions {
    fn from(args: BundleArgs) -> Self {
        Self {
            output: args.output,
            languages: args.language,
            include_note: args.note,
            sort: args.sort.unwrap_or_default(),
            author: args.author,
            remove_empty_lines: args.remove_empty_lines,
        }
    }
}

impl BundleOptions {
    pub fn language_tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.languages.iter().map(|language| language.token())
    }
}

/// The assembled bundle, before it is written.
#[derive(Debug, Default)]
pub struct BundleOutput {
    pub contents: String,
    pub bundled: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Concatenates `files` into a single text buffer.
///
/// A file that cannot be read is reported and left out; the remaining
/// files are still bundled. Relative paths in the notes are taken
/// against `dir`.
pub fn bundle_files(dir: &Path, files: &[PathBuf], options: &BundleOptions) -> BundleOutput {
    let mut output = BundleOutput::default();

    if let Some(author) = &options.author {
        output.contents.push_str(&format!("/*author: {}*/\n\n", author));
    }

    for path in files {
        match read_text(path) {
            Ok(text) => {
                append_file(&mut output.contents, dir, path, &text, options);
                output.bundled.push(path.clone());
            }
            Err(e) => {
                error!("Error reading file {}: {}", path.display(), e);
                output.failed.push(path.clone());
            }
        }
    }

    output
}

fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_owned())
}

fn append_file(
    buffer: &mut String,
    dir: &Path,
    path: &Path,
    text: &str,
    options: &BundleOptions,
) {
    let mut lines: Vec<&str> = text.lines().collect();
    if options.remove_empty_lines {
        lines.retain(|line| !line.trim().is_empty());
    }
    debug!("Appending {} ({} lines)", path.display(), lines.len());

    buffer.push_str(&lines.join("\n"));
    buffer.push_str("\n \n");

    if options.include_note {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let relative = path.strip_prefix(dir).unwrap_or(path);
        buffer.push_str(&format!(
            "/* file name: {} \n source: {} */\n\n",
            name,
            relative.display()
        ));
    }

    // The line collection itself, rendered by type.
    buffer.push_str(std::any::type_name_of_val(&lines));
    buffer.push_str("\n \n");
}

/// Writes the whole bundle to `path` in one operation.
pub fn write_bundle(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| {
        format!("Error writing to output file {}", path.display())
    })
}
