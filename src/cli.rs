use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sitesearch", version)]
#[command(about = "Search a documentation site's pages", long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config_dir>/sitesearch/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// JSON document array to search, overriding the configuration
    #[arg(short, long, global = true)]
    pub documents: Option<PathBuf>,
    /// Always rebuild the index instead of using the on-disk cache
    #[arg(long, global = true)]
    pub no_cache: bool,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Ranked full-text results
    Search {
        query: String,
        /// Maximum number of results, at least 1
        #[arg(
            short = 'n',
            long,
            default_value = "10",
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        limit: usize,
    },
    /// The typeahead dropdown for a query
    Suggest { query: String },
    /// Select a suggestion and print its navigation target
    Open {
        query: String,
        /// 1-based position in the dropdown
        #[arg(short, long, default_value = "1")]
        pick: usize,
    },
    /// Print the page stored under a url
    Lookup { url: String },
    /// Validate the document file and report index statistics
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_limit() {
        let_assert!(Ok(cli) = Cli::try_parse_from(["sitesearch", "search", "themes", "-n", "5"]));
        let_assert!(Commands::Search { query, limit } = cli.command);
        check!(query == "themes");
        check!(limit == 5);

        let_assert!(Ok(cli) = Cli::try_parse_from(["sitesearch", "search", "themes"]));
        check!(matches!(cli.command, Commands::Search { limit: 10, .. }));

        check!(Cli::try_parse_from(["sitesearch", "search", "themes", "-n", "0"]).is_err());
    }
}
