use anstyle::{AnsiColor, Effects};
use clap::builder::styling::Styles;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bundle the source files of selected languages in the current folder into
/// a single text file.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, styles = styles())]
pub struct Cli {
    /// The subcommand to execute ('bundle' or 'create-rsp').
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output. Use -v for debug logging, -vv for tracing.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Defines the available subcommands for the application.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Bundle files into one file.
    Bundle(BundleArgs),
    /// Interactively create a response file holding a 'bundle' command line.
    CreateRsp,
}

/// Defines the arguments for the 'bundle' subcommand.
#[derive(ClapArgs, Debug, Clone)]
pub struct BundleArgs {
    /// File path and name of the bundled output.
    #[arg(long, visible_alias = "o", value_name = "PATH")]
    pub output: PathBuf,

    /// Languages to include, or 'all'. Several may follow a single flag.
    /// Example: --language python csharp
    #[arg(long, visible_alias = "l", num_args = 1.., value_name = "LANGUAGE")]
    pub language: Vec<Language>,

    /// Write a note with the name and relative path after each file.
    #[arg(long, visible_alias = "n")]
    pub note: bool,

    /// Sort files by 'name' or 'type' (default is 'name').
    #[arg(long, num_args = 0..=1, default_missing_value = "name", value_name = "ORDER")]
    pub sort: Option<SortBy>,

    /// Name of the author, written as a header at the top of the bundle.
    #[arg(long, visible_alias = "a", value_name = "NAME")]
    pub author: Option<String>,

    /// Remove empty and whitespace-only lines before bundling.
    #[arg(long, visible_alias = "rm")]
    pub remove_empty_lines: bool,
}

/// Language tokens accepted by `--language`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Csharp,
    Java,
    Sql,
    Js,
    Html,
    #[value(name = "c++")]
    Cpp,
    Css,
    All,
}

impl Language {
    /// The registry token for this language.
    pub fn token(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Csharp => "csharp",
            Language::Java => "java",
            Language::Sql => "sql",
            Language::Js => "js",
            Language::Html => "html",
            Language::Cpp => "c++",
            Language::Css => "css",
            Language::All => crate::languages::ALL_TOKEN,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Order by file name.
    #[default]
    Name,
    /// Order by file extension.
    Type,
}

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .placeholder(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Red.on_default().effects(Effects::BOLD))
}
