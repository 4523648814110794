use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use ubci::core::catalog::Category;
use ubci::core::config::AppConfig;
use ubci::core::log::init_logging;
use ubci::{AppCommand, cli::setup};

const EXAMPLES: &str = "\
Examples:
  ubci market             List market indices
  ubci sector SCTIDXA     Tickers of the Infrastructure sector
  ubci UBMI               Tickers of an index, any category
  ubci KRW-BTC            Indices containing a ticker
  ubci refresh            Refetch all index data";

#[derive(Parser)]
#[command(version, about, after_help = EXAMPLES)]
struct Cli {
    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    /// Log file path, defaults to a dated file in the config directory
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List market indices, or the tickers of one
    Market { index: Option<String> },
    /// List strategy indices, or the tickers of one
    Strategy { index: Option<String> },
    /// List theme indices, or the tickers of one
    Theme { index: Option<String> },
    /// List sector indices, or the tickers of one
    Sector { index: Option<String> },
    /// Refetch all index data, ignoring the cache
    Refresh,
    /// An index code or a ticker
    #[command(external_subcommand)]
    Query(Vec<String>),
}

fn category_command(category: Category, index: Option<String>) -> AppCommand {
    match index {
        Some(index) => AppCommand::Tickers {
            category,
            index: index.to_uppercase(),
        },
        None => AppCommand::List(category),
    }
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Market { index } => category_command(Category::Market, index),
            Commands::Strategy { index } => category_command(Category::Strategy, index),
            Commands::Theme { index } => category_command(Category::Theme, index),
            Commands::Sector { index } => category_command(Category::Sector, index),
            Commands::Refresh => AppCommand::Refresh,
            Commands::Query(args) => {
                // Upper or mixed case category words miss the subcommands above.
                let mut args = args.into_iter();
                let first = args.next().unwrap_or_default();
                match first.parse::<Category>() {
                    Ok(category) => category_command(category, args.next()),
                    Err(_) => AppCommand::Query(first.to_uppercase()),
                }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

/// Command line flags win over the config file.
fn resolve_logging(
    cli: &Cli,
    config: Option<&AppConfig>,
) -> Result<(Option<LevelFilter>, Option<PathBuf>)> {
    let level = match (cli.log_level, config.and_then(|c| c.log.level.as_deref())) {
        (Some(level), _) => Some(level),
        (None, Some(level)) => Some(
            LevelFilter::from_str(level)
                .with_context(|| format!("Invalid log level in config: {level}"))?,
        ),
        (None, None) => None,
    };
    let file = cli.log_file.clone().or_else(|| {
        config
            .and_then(|c| c.log.file.as_ref())
            .map(PathBuf::from)
    });
    Ok((level, file))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Setup) {
        let (level, file) = resolve_logging(&cli, None)?;
        init_logging(level, file.as_deref());
        return setup::setup();
    }

    let config = ubci::load_config(cli.config_path.as_deref())?;
    let (level, file) = resolve_logging(&cli, Some(&config))?;
    init_logging(level, file.as_deref());

    let result = match cli.command {
        Some(cmd) => ubci::run_with_config(cmd.into(), &config).await,
        None => Ok(()),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppCommand {
        let cli = Cli::try_parse_from(args).unwrap();
        cli.command.unwrap().into()
    }

    #[test]
    fn test_category_words_ignore_case() {
        assert_eq!(parse(&["ubci", "market"]), AppCommand::List(Category::Market));
        assert_eq!(parse(&["ubci", "MARKET"]), AppCommand::List(Category::Market));
        assert_eq!(parse(&["ubci", "Sector"]), AppCommand::List(Category::Sector));
        assert_eq!(
            parse(&["ubci", "Market", "ubmi"]),
            AppCommand::Tickers {
                category: Category::Market,
                index: "UBMI".to_string(),
            }
        );
        assert_eq!(
            parse(&["ubci", "THEME", "thmidx17"]),
            AppCommand::Tickers {
                category: Category::Theme,
                index: "THMIDX17".to_string(),
            }
        );
    }

    #[test]
    fn test_bare_arguments_are_upper_cased() {
        assert_eq!(parse(&["ubci", "ubmi"]), AppCommand::Query("UBMI".to_string()));
        assert_eq!(
            parse(&["ubci", "krw-btc"]),
            AppCommand::Query("KRW-BTC".to_string())
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["ubci", "--log-level", "debug", "-c", "c.yaml", "UBMI"])
            .unwrap();
        assert_eq!(cli.log_level, Some(LevelFilter::DEBUG));
        assert_eq!(cli.config_path.as_deref(), Some("c.yaml"));
    }
}
