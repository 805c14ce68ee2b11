use clap::Parser;
use fm::{cli::Cli, response, run};

fn main() -> anyhow::Result<()> {
    let args = response::expand_response_files(std::env::args_os())?;
    let cli = Cli::parse_from(args);

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    run(cli)
}
