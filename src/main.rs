use clap::Parser;
use pesticide_tox::{cli, config, error, export, lookup, search, session, workbook};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use pesticide_tox_common::export::records_table;
use pesticide_tox_common::unique_ingredients;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Keywords => {
            let path = config.workbook(cli.workbook.as_ref());
            let keywords = workbook::list_keywords(&path)?;
            println!("✔ {} keywords in {}\n", keywords.len(), path.display());
            for keyword in &keywords {
                println!("  {}", keyword);
            }
        }

        Commands::Filter { keywords, output } => {
            let path = config.workbook(cli.workbook.as_ref());
            let records = workbook::filter_rows(&path, &keywords)?;

            if records.is_empty() {
                println!("⚠ No rows match: {}", keywords.join(", "));
                return Ok(());
            }

            export::terminal::print_table(&records_table(&records));
            println!("Active ingredients:");
            for name in unique_ingredients(&records) {
                println!("  {}", name);
            }

            if let Some(output) = output {
                export::export_filtered(&records, &keywords, &output)?;
            }
        }

        Commands::Search { doses, output } => {
            let client = lookup::LookupClient::from_config(&config)?;
            log::debug!("index page: {}", client.index_url());
            let progress = search::progress_bar(doses.len());
            let report = search::run_search(&client, &doses, &progress);

            session::print_report(&report);
            if !report.warnings.is_empty() {
                println!("\n⚠ {} warning(s)", report.warnings.len());
            }

            if let Some(output) = output {
                export::export_report(&report, &output)?;
            }
        }

        Commands::Run => {
            let path = config.workbook(cli.workbook.as_ref());
            session::run_interactive(&config, &path)?;
        }

        Commands::Config { show, set_workbook, set_index_url, set_timeout } => {
            let mut config = config;

            if let Some(path) = set_workbook {
                config.set_workbook(path)?;
                println!("✔ Workbook saved");
            }

            if let Some(url) = set_index_url {
                config.set_index_url(url)?;
                println!("✔ Index URL saved");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ Timeout saved");
            }

            if show {
                println!("Configuration ({}):", Config::config_path()?.display());
                println!("  Workbook: {}", config.workbook(cli.workbook.as_ref()).display());
                println!("  Index URL: {}", config.index_url);
                println!("  Timeout: {}s (connect {}s)", config.timeout_seconds, config.connect_timeout_seconds);
                println!("  User agent: {}", config.user_agent);
            }
        }
    }

    Ok(())
}
