mod commands;
mod util;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

pub use util::{CliResult, InputFile};

#[derive(Parser, Debug)]
#[command(name = "xbfload", version, about = "Inspect and load decoded XBF documents")]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the node streams of a document, one node per line.
    Disasm(commands::disasm::DisasmArgs),
    /// Realize the root stream into an object graph and print it.
    Load(commands::load::LoadArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = execute(&cli)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Runs a parsed command line and returns what would be printed.
pub fn execute(cli: &Cli) -> CliResult<String> {
    match &cli.command {
        Command::Disasm(args) => commands::disasm::run(args),
        Command::Load(args) => commands::load::run(args),
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["xbfload", "disasm", "doc.json", "-vv"]).expect("parse");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Disasm(_)));
    }

    #[rstest]
    fn load_defaults_to_text() {
        let cli = Cli::try_parse_from(["xbfload", "load", "doc.json"]).expect("parse");
        let Command::Load(args) = cli.command else { panic!("expected load") };
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[rstest]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["xbfload", "load", "doc.json", "--format", "xml"]).is_err());
    }
}
