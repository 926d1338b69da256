use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dashboard::{DashboardError, HELP, Outcome, Selection, Session};
use data_loader::MovieCatalog;
use metadata_client::{OmdbClient, OmdbConfig};
use pipeline::{Cleaner, Enricher};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

mod render;

/// ReelScope - streaming catalog cleaning, ratings enrichment and a
/// per-country movie popularity dashboard
#[derive(Parser)]
#[command(name = "reelscope")]
#[command(about = "Clean and enrich a streaming catalog, explore movie popularity by country", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop incomplete catalog rows and reduce countries and categories to one value
    Clean {
        /// Raw catalog table
        #[arg(long, default_value = "netflix_titles.csv")]
        input: PathBuf,

        /// Cleaned table to write (overwritten)
        #[arg(long, default_value = "netflix_cleaned.csv")]
        output: PathBuf,
    },

    /// Attach external ratings to a cleaned table
    Enrich {
        /// Cleaned table produced by `clean`
        #[arg(long, default_value = "netflix_cleaned.csv")]
        input: PathBuf,

        /// Enriched table to write (overwritten)
        #[arg(long, default_value = "netflix_imdb_enriched.csv")]
        output: PathBuf,

        /// OMDb API key
        #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Minimum delay between lookups, in milliseconds
        #[arg(long, default_value = "200")]
        delay_ms: u64,

        /// OMDb endpoint
        #[arg(long, default_value = metadata_client::omdb::DEFAULT_BASE_URL)]
        base_url: String,

        /// Per-request timeout, in seconds
        #[arg(long, default_value_t = metadata_client::omdb::DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Explore the top 10 movies per production country
    Dashboard {
        #[command(flatten)]
        tables: MovieTables,

        /// Country to show first (default: first in alphabetical order)
        #[arg(long)]
        country: Option<String>,

        /// Start in compare mode against this country
        #[arg(long)]
        compare: Option<String>,

        /// Write top10_<country>.csv into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Print the view once and exit instead of reading commands
        #[arg(long)]
        once: bool,
    },

    /// List the countries available in the dashboard
    Countries {
        #[command(flatten)]
        tables: MovieTables,
    },
}

#[derive(clap::Args)]
struct MovieTables {
    /// Movies metadata table
    #[arg(long, default_value = "tmdb_5000_movies.csv")]
    movies: PathBuf,

    /// Credits table (only movie_id is read)
    #[arg(long, default_value = "tmdb_5000_credits.csv")]
    credits: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Clean { input, output } => handle_clean(&input, &output)?,
        Commands::Enrich {
            input,
            output,
            api_key,
            delay_ms,
            base_url,
            timeout_secs,
        } => handle_enrich(
            &input,
            &output,
            OmdbConfig::new(api_key)
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(timeout_secs)),
            Duration::from_millis(delay_ms),
        )?,
        Commands::Dashboard {
            tables,
            country,
            compare,
            export_dir,
            once,
        } => {
            let catalog = load_catalog(&tables)?;
            let mut selection = Selection {
                primary: country,
                ..Default::default()
            };
            if compare.is_some() {
                selection = selection.with_compare(compare);
            }
            handle_dashboard(&catalog, selection, export_dir, once)?
        }
        Commands::Countries { tables } => {
            let catalog = load_catalog(&tables)?;
            handle_countries(&catalog);
        }
    }

    Ok(())
}

/// Handle the 'clean' command
fn handle_clean(input: &Path, output: &Path) -> Result<()> {
    let report = Cleaner::clean_file(input, output)?;
    println!(
        "{} Cleaned {} rows into {} ({} dropped), saved as {}",
        "✓".green(),
        report.input_rows,
        report.output_rows,
        report.dropped(),
        output.display()
    );
    Ok(())
}

/// Handle the 'enrich' command
fn handle_enrich(input: &Path, output: &Path, config: OmdbConfig, delay: Duration) -> Result<()> {
    let client = OmdbClient::new(config).context("Failed to build the OMDb client")?;
    println!("Looking up titles from {} at {}", input.display(), client.base_url());
    let mut enricher = Enricher::new(client).with_delay(delay);

    let start = Instant::now();
    let report = enricher.enrich_file(input, output)?;
    println!(
        "{} Enriched {} rows ({} titles: {} matched, {} unmatched, {} failed) in {:?}",
        "✓".green(),
        report.rows,
        report.distinct_keys,
        report.matched.to_string().green(),
        report.unmatched.to_string().yellow(),
        report.failed.to_string().red(),
        start.elapsed()
    );
    println!("Saved as {}", output.display());
    Ok(())
}

/// Load the catalog once; every dashboard handler borrows it
fn load_catalog(tables: &MovieTables) -> Result<MovieCatalog> {
    println!(
        "Loading movies from {} and credits from {}...",
        tables.movies.display(),
        tables.credits.display()
    );
    let start = Instant::now();
    let catalog = MovieCatalog::load(&tables.movies, &tables.credits)
        .context("Failed to load the movie tables")?;
    println!(
        "{} Loaded {} rows across {} countries in {:?}",
        "✓".green(),
        catalog.len(),
        catalog.countries().len(),
        start.elapsed()
    );
    Ok(catalog)
}

/// Handle the 'countries' command
fn handle_countries(catalog: &MovieCatalog) {
    println!("{}", "Countries:".bold().blue());
    for country in catalog.countries() {
        println!("  {}", country);
    }
}

/// Handle the 'dashboard' command
fn handle_dashboard(
    catalog: &MovieCatalog,
    selection: Selection,
    export_dir: Option<PathBuf>,
    once: bool,
) -> Result<()> {
    let mut session = Session::new(catalog, selection).context("Invalid country selection")?;
    println!("{}", "🎬 Movie Popularity Dashboard".bold());
    render::print_view(&session.view());

    if let Some(dir) = export_dir {
        match session.apply(dashboard::Command::Export(Some(dir))) {
            Ok(Outcome::Exported(path)) => println!("{} Saved {}", "✓".green(), path.display()),
            Ok(_) => {}
            Err(DashboardError::ExportUnavailable) => {
                println!("{}", "Nothing to export for this view".yellow())
            }
            Err(e) => return Err(e).context("Export failed"),
        }
    }

    if once {
        return Ok(());
    }

    println!("{}", "Type 'help' for commands.".dimmed());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match session.execute(&line) {
            Ok(Outcome::Render) => render::print_view(&session.view()),
            Ok(Outcome::Countries(countries)) => {
                for country in countries {
                    println!("  {}", country);
                }
            }
            Ok(Outcome::Exported(path)) => println!("{} Saved {}", "✓".green(), path.display()),
            Ok(Outcome::Help) => println!("{}", HELP),
            Ok(Outcome::Quit) => break,
            // Bad input and failed exports never end the session
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }

    Ok(())
}
