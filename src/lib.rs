use log::{debug, error, info};
use std::io;
use std::path::{Path, PathBuf};

pub mod cli;
pub mod languages;
pub mod processor;
pub mod response;
pub mod walker;

use cli::{Cli, Commands};
use processor::BundleOptions;

/// The core logic of the application.
///
/// Failures inside a command are reported and end that command; they are
/// not returned to the caller.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(dir) = working_dir(std::env::current_dir()) else {
        return Ok(());
    };
    match cli.command {
        Commands::Bundle(args) => run_bundle(&dir, BundleOptions::from(args)),
        Commands::CreateRsp => run_create_rsp(&dir),
    }
    Ok(())
}

/// Reports a working directory that cannot be resolved (e.g. it was removed).
fn working_dir(current: io::Result<PathBuf>) -> Option<PathBuf> {
    match current {
        Ok(dir) => Some(dir),
        Err(e) => {
            error!("Directory not found: {}", e);
            None
        }
    }
}

/// The logic for the 'bundle' command, run against `dir`.
pub fn run_bundle(dir: &Path, options: BundleOptions) {
    match bundle(dir, &options) {
        Ok(_) => println!("file bundled successfully!"),
        Err(e) => error!("{:#}", e),
    }
}

/// The logic for the 'create-rsp' command, answered from stdin.
pub fn run_create_rsp(dir: &Path) {
    let stdin = io::stdin();
    if let Err(e) = response::create_response_file(stdin.lock(), io::stdout(), dir) {
        error!("An error occurred while creating the response file: {:#}", e);
    }
}

/// Selects, concatenates and writes the files of `dir` described by
/// `options`. Returns the path of the written bundle.
pub fn bundle(dir: &Path, options: &BundleOptions) -> anyhow::Result<PathBuf> {
    info!("Processing files in folder: {}", dir.display());

    let extensions = languages::resolve_extensions(options.language_tokens());
    info!("Using extensions: {}", extensions.join(", "));

    let output_path = dir.join(&options.output);
    let files = walker::find_files(dir, &extensions, options.sort)?;

    let output = processor::bundle_files(dir, &files, options);
    debug!(
        "Bundled {} file(s), {} failed",
        output.bundled.len(),
        output.failed.len()
    );

    processor::write_bundle(&output_path, &output.contents)?;
    info!("Files have been written to {}", output_path.display());

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Language, SortBy};
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use std::fs;

    fn get_test_options(languages: Vec<Language>) -> BundleOptions {
        BundleOptions {
            output: PathBuf::from("out.txt"),
            languages,
            include_note: false,
            sort: SortBy::Name,
            author: None,
            remove_empty_lines: false,
        }
    }

    #[test]
    fn test_bundles_selected_languages_in_name_order() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a.py").write_str("print('a')\n")?;
        dir.child("b.cs").write_str("class B {}\n")?;
        dir.child("c.txt").write_str("not code\n")?;

        let options = get_test_options(vec![Language::Python, Language::Csharp]);
        let path = bundle(dir.path(), &options)?;

        let result = fs::read_to_string(path)?;
        let a = result.find("print('a')").expect("a.py bundled");
        let b = result.find("class B {}").expect("b.cs bundled");
        assert!(a < b);
        assert!(!result.contains("not code"));
        Ok(())
    }

    #[test]
    fn test_all_includes_every_language() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("q.sql").write_str("SELECT 1;")?;
        dir.child("s.css").write_str("body {}")?;
        dir.child("r.rs").write_str("fn main() {}")?;

        let path = bundle(dir.path(), &get_test_options(vec![Language::All]))?;

        let result = fs::read_to_string(path)?;
        assert!(result.contains("SELECT 1;"));
        assert!(result.contains("body {}"));
        assert!(!result.contains("fn main"));
        Ok(())
    }

    #[test]
    fn test_existing_output_is_bundled_before_overwrite() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("app.js").write_str("let x = 1;")?;
        dir.child("bundle.js").write_str("stale")?;

        let mut options = get_test_options(vec![Language::Js]);
        options.output = PathBuf::from("bundle.js");
        let path = bundle(dir.path(), &options)?;

        let result = fs::read_to_string(path)?;
        let app = result.find("let x = 1;").expect("app.js bundled");
        let stale = result.find("stale").expect("previous bundle.js bundled");
        assert!(app < stale);
        Ok(())
    }

    #[test]
    fn test_no_matching_files_writes_empty_bundle() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("readme.md").write_str("# hi")?;

        let path = bundle(dir.path(), &get_test_options(vec![Language::Java]))?;

        assert_eq!(fs::read_to_string(path)?, "");
        Ok(())
    }

    #[test]
    fn test_unwritable_output_is_reported_not_raised() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a.py").write_str("x = 1")?;

        let mut options = get_test_options(vec![Language::Python]);
        options.output = PathBuf::from("missing/out.txt");

        assert!(bundle(dir.path(), &options).is_err());
        run_bundle(dir.path(), options);
        assert!(!dir.path().join("missing").exists());
        Ok(())
    }

    #[test]
    fn test_unresolvable_working_dir_is_reported() {
        let gone = Err(io::Error::from(io::ErrorKind::NotFound));
        assert!(working_dir(gone).is_none());
        assert_eq!(
            working_dir(Ok(PathBuf::from("/work"))),
            Some(PathBuf::from("/work"))
        );
    }

    #[test]
    fn test_missing_directory_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        run_bundle(&missing, get_test_options(vec![Language::All]));
        assert!(!missing.exists());
    }
}
