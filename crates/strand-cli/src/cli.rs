use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "strandorder - inspect and manipulate the strand ordering of a nucleic-acid complex given in dot-bracket notation.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the strand count, joined views and strand names of a complex.
    Inspect(InspectArgs),
    /// Resolve a flat index to the strand and offset it names.
    Locate(LocateArgs),
    /// Re-root the complex so that the given strand comes first.
    Rotate(RotateArgs),
}

/// Input shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ComplexArgs {
    /// Strand sequences joined by '+' (e.g. GGG+CCC).
    #[arg(short, long, required = true, value_name = "SEQ")]
    pub sequence: String,

    /// Dot-bracket structure joined by '+' (e.g. "(((+)))").
    #[arg(short = 'd', long, required = true, value_name = "DOT_BRACKET")]
    pub structure: String,

    /// Comma-separated strand tags, one per strand.
    #[arg(long, value_name = "TAG,...", value_delimiter = ',')]
    pub ids: Option<Vec<String>>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject malformed structures instead of warning, overriding the config file.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub complex: ComplexArgs,
}

/// Arguments for the `locate` subcommand.
#[derive(Args, Debug)]
pub struct LocateArgs {
    #[command(flatten)]
    pub complex: ComplexArgs,

    /// Zero-based index into the '+'-joined structure string.
    #[arg(short, long, required = true, value_name = "INT")]
    pub index: usize,
}

/// Arguments for the `rotate` subcommand.
#[derive(Args, Debug)]
pub struct RotateArgs {
    #[command(flatten)]
    pub complex: ComplexArgs,

    /// Zero-based position of the strand that becomes the new head.
    #[arg(short = 'k', long, required = true, value_name = "INT")]
    pub strand: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_locate_with_ids_and_global_flags() {
        let cli = Cli::try_parse_from([
            "strandorder",
            "-vv",
            "locate",
            "--sequence",
            "ACGT+TTTT",
            "--structure",
            "(..(+)..)",
            "--ids",
            "a,b",
            "--index",
            "6",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Locate(args) = cli.command else {
            panic!("expected the locate subcommand");
        };
        assert_eq!(args.index, 6);
        assert_eq!(args.complex.ids, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(!args.complex.strict);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from([
            "strandorder",
            "-q",
            "-v",
            "inspect",
            "-s",
            "A",
            "-d",
            ".",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rotate_requires_a_strand() {
        let result = Cli::try_parse_from(["strandorder", "rotate", "-s", "A", "-d", "."]);
        assert!(result.is_err());
    }
}
