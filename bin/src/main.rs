//! sixtick CLI - SIX Swiss Exchange tick data collector.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod batch;
mod commands;
mod config;
mod options;

use config::Settings;
use options::{FormatArgs, FormatHint, OutputArgs, RangeArgs};

#[derive(Parser)]
#[command(name = "sixtick")]
#[command(about = "SIX Swiss Exchange tick data collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Database file. Defaults to sixtick.db in the user data directory.
    #[arg(long, env = "SIXTICK_DB", value_name = "PATH", global = true)]
    db: Option<PathBuf>,

    /// Hidden: export endpoint override (testing against a local server)
    #[arg(long, env = "SIXTICK_ENDPOINT", hide = true, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tracked securities
    List,

    /// Track securities, storing their current ticks
    Add {
        /// Symbols or ISINs (e.g., ABBN, CH0012221716)
        #[arg(required = true, value_name = "SYMBOL_OR_ISIN")]
        ids: Vec<String>,
    },

    /// Stop tracking securities
    Remove {
        /// Symbols or ISINs
        #[arg(required = true, value_name = "SYMBOL_OR_ISIN")]
        ids: Vec<String>,
    },

    /// Stop tracking securities and erase their stored ticks
    Purge {
        /// Symbols or ISINs
        #[arg(required = true, value_name = "SYMBOL_OR_ISIN")]
        ids: Vec<String>,
    },

    /// Fetch and store new ticks. Defaults to every tracked security.
    Update {
        /// Symbols or ISINs
        #[arg(value_name = "SYMBOL_OR_ISIN")]
        ids: Vec<String>,
    },

    /// Fetch ticks straight into a file
    Grab {
        /// Symbols or ISINs
        #[arg(required = true, value_name = "SYMBOL_OR_ISIN")]
        ids: Vec<String>,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write stored ticks to a file
    Export {
        /// Symbols or ISINs
        #[arg(required = true, value_name = "SYMBOL_OR_ISIN")]
        ids: Vec<String>,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Store ticks read from a file
    Load {
        /// Input file
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        format: FormatHint,

        /// Security the file belongs to, when the file does not say
        #[arg(long = "as", value_name = "SYMBOL_OR_ISIN")]
        alias: Option<String>,
    },

    /// Create database indexes
    Setup,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = Settings::new(cli.db, cli.endpoint, cli.quiet);

    match command {
        Commands::List => commands::list::list_watchlist(&settings),
        Commands::Add { ids } => commands::add::add(&settings, &ids).await,
        Commands::Remove { ids } => commands::remove::remove(&settings, &ids, false),
        Commands::Purge { ids } => commands::remove::remove(&settings, &ids, true),
        Commands::Update { ids } => commands::update::update(&settings, &ids).await,
        Commands::Grab {
            ids,
            format,
            output,
        } => commands::grab::grab(&settings, &ids, format.format(), &output).await,
        Commands::Export {
            ids,
            format,
            output,
            range,
        } => commands::export::export(&settings, &ids, format.format(), &output, &range),
        Commands::Load {
            file,
            format,
            alias,
        } => commands::load::load(&settings, &file, format.format(), alias.as_deref()),
        Commands::Setup => commands::setup::setup(&settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixtick_lib::prelude::{Format, WriteMode};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_grab_requires_a_format() {
        assert!(Cli::try_parse_from(["sixtick", "grab", "ABBN"]).is_err());
        assert!(Cli::try_parse_from(["sixtick", "grab", "ABBN", "--csv", "--json"]).is_err());
    }

    #[test]
    fn test_grab_options() {
        let cli = Cli::try_parse_from(["sixtick", "grab", "ABBN", "NESN", "--json", "-a", "-f", "-"])
            .unwrap();
        let Some(Commands::Grab { ids, format, output }) = cli.command else {
            panic!("expected grab");
        };
        assert_eq!(ids, ["ABBN", "NESN"]);
        assert_eq!(format.format(), Format::Json);
        assert_eq!(output.mode(), WriteMode::Append);
        assert_eq!(
            output.destination("ABBN", Format::Json),
            sixtick_lib::Destination::Stdout
        );
    }

    #[test]
    fn test_append_conflicts_with_overwrite() {
        let parsed = Cli::try_parse_from([
            "sixtick", "export", "ABBN", "--csv", "--append", "--overwrite",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_format_is_optional() {
        let cli = Cli::try_parse_from(["sixtick", "load", "-f", "ABBN.csv", "--as", "ABBN"]).unwrap();
        let Some(Commands::Load { format, alias, .. }) = cli.command else {
            panic!("expected load");
        };
        assert_eq!(format.format(), None);
        assert_eq!(alias.as_deref(), Some("ABBN"));
    }

    #[test]
    fn test_update_without_ids() {
        let cli = Cli::try_parse_from(["sixtick", "-q", "update"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Update { ids }) if ids.is_empty()));
    }
}
