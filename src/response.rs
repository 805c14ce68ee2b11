//! Response files: a saved `bundle` command line that can be replayed with
//! `fm @name.rsp`, and the interactive wizard that writes one.

use anyhow::Context;
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const RESPONSE_EXTENSION: &str = "rsp";

/// Answers collected by the wizard, in the order they are asked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseAnswers {
    pub output: String,
    pub all_languages: bool,
    pub languages: String,
    pub note: bool,
    pub sort: String,
    pub remove_empty_lines: bool,
    pub author: String,
    pub response_name: String,
}

impl ResponseAnswers {
    /// Renders the answers as a `bundle` command line.
    ///
    /// Answers are inserted as typed; the language list and sort order are
    /// validated only when the command is replayed.
    pub fn to_command_line(&self) -> String {
        let mut parts = vec!["bundle".to_string(), format!("--output {}", quote(&self.output))];

        if self.all_languages {
            parts.push("--language all".to_string());
        } else {
            parts.push(format!("--language {}", self.languages.trim()));
        }
        if self.remove_empty_lines {
            parts.push("--remove-empty-lines".to_string());
        }
        if self.note {
            parts.push("--note".to_string());
        }
        if !self.sort.trim().is_empty() {
            parts.push(format!("--sort {}", self.sort.trim()));
        }
        if !self.author.is_empty() {
            parts.push(format!("--author {}", quote(&self.author)));
        }

        parts.join(" ")
    }
}

/// Wraps a value in double quotes, escaping quotes inside it as `\"`.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Line-oriented question/answer session over any reader and writer.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("No answer given to: {}", question);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Only `Y` (any case) counts as yes.
    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("y"))
    }
}

fn collect_answers<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<ResponseAnswers> {
    let output = prompter.ask("What's the file name for output?")?;
    let all_languages = prompter.confirm("Would you like to include all languages? Insert Y or N")?;
    let languages = prompter.ask(
        "If you don't want to include all languages, which languages to include? (separate by space)",
    )?;
    let note = prompter.confirm("Would you like to put a note with each file's source? Insert Y or N")?;
    let sort = prompter.ask("How would you like to sort the files? Insert name or type (empty for default)")?;
    let remove_empty_lines = prompter.confirm("Would you like to remove empty lines? Insert Y or N")?;
    let author = prompter.ask("Who is the author? (leave empty to skip)")?;
    let response_name = prompter.ask("What's the file name for the response file?")?;

    Ok(ResponseAnswers {
        output,
        all_languages,
        languages,
        note,
        sort,
        remove_empty_lines,
        author,
        response_name,
    })
}

/// Runs the wizard and writes `<response name>.rsp` into `dir`.
pub fn create_response_file<R: BufRead, W: Write>(
    input: R,
    output: W,
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let mut prompter = Prompter { input, output };
    let answers = collect_answers(&mut prompter)?;
    debug!("Collected answers: {:?}", answers);

    let command = answers.to_command_line();
    let path = dir.join(format!("{}.{}", answers.response_name, RESPONSE_EXTENSION));
    fs::write(&path, &command)
        .with_context(|| format!("Failed to write response file {}", path.display()))?;
    info!("Wrote response file {}", path.display());

    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    writeln!(prompter.output, "Response file created: {}", file_name)?;
    writeln!(
        prompter.output,
        "Ok! All is done. Run the command: {} @{}",
        env!("CARGO_PKG_NAME"),
        file_name
    )?;

    Ok(path)
}

/// Replaces every `@path` argument after the program name with the tokens
/// stored in that response file.
pub fn expand_response_files<I>(args: I) -> anyhow::Result<Vec<OsString>>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = Vec::new();

    for (index, arg) in args.into_iter().enumerate() {
        let path = match arg.to_str().and_then(|s| s.strip_prefix('@')) {
            Some(path) if index > 0 && !path.is_empty() => PathBuf::from(path),
            _ => {
                expanded.push(arg);
                continue;
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read response file {}", path.display()))?;
        let tokens = parse_response_file(&contents);
        debug!("Expanded {} into {} argument(s)", path.display(), tokens.len());
        expanded.extend(tokens.into_iter().map(OsString::from));
    }

    Ok(expanded)
}

/// Splits response file contents into arguments.
///
/// Blank lines and lines starting with `#` are skipped. Tokens are separated
/// by whitespace; double quotes group a token and are removed, and `\"`
/// stands for a literal quote. Other backslashes are kept as written.
pub fn parse_response_file(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_line)
        .collect()
}

fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
                in_token = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
}
