//! CLI definition

use crate::search::DoseEntry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pesticide-tox")]
#[command(about = "Filter a pesticide registry workbook and compute toxicological units", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry workbook (overrides config and PESTICIDE_TOX_WORKBOOK)
    #[arg(short, long, global = true)]
    pub workbook: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the product class keywords found in the workbook
    Keywords,

    /// Show the rows whose product class contains any keyword
    Filter {
        /// Keyword (repeatable)
        #[arg(short, long = "keyword", required = true)]
        keywords: Vec<String>,

        /// Save the table (.json or .xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up ingredients and compute UTm / UTi
    Search {
        /// Ingredient and dose as NAME=DOSE (repeatable)
        #[arg(short, long = "dose", required = true)]
        doses: Vec<DoseEntry>,

        /// Save the result tables (.json or .xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive session: keywords, ingredients, doses, search
    Run,

    /// Show or edit the configuration
    Config {
        /// Show the configuration
        #[arg(long)]
        show: bool,

        /// Default workbook path
        #[arg(long)]
        set_workbook: Option<PathBuf>,

        /// Index page of the reference database
        #[arg(long)]
        set_index_url: Option<String>,

        /// HTTP timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_doses() {
        let cli = Cli::parse_from([
            "pesticide-tox", "search", "-d", "GLIFOSATO=5", "--dose", "MANCOZEB=1.5",
        ]);
        match cli.command {
            Commands::Search { doses, output } => {
                assert_eq!(doses.len(), 2);
                assert_eq!(doses[1].ingredient, "MANCOZEB");
                assert_eq!(doses[1].dose, 1.5);
                assert!(output.is_none());
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_filter_with_global_workbook() {
        let cli = Cli::parse_from([
            "pesticide-tox", "filter", "-k", "HERBICIDA", "-k", "FUNGICIDA", "-w", "registro.xlsx",
        ]);
        assert_eq!(cli.workbook, Some(PathBuf::from("registro.xlsx")));
        assert!(matches!(cli.command, Commands::Filter { ref keywords, .. } if keywords.len() == 2));
    }

    #[test]
    fn test_invalid_dose_rejected() {
        assert!(Cli::try_parse_from(["pesticide-tox", "search", "-d", "GLIFOSATO"]).is_err());
    }
}
