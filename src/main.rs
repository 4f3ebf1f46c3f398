use clap::{Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tv_show_finder::{
    BrowserConfig, DEFAULT_BASE_URL, PLACEHOLDER_IMAGE, RenderOutcome, ShowBrowser,
    ShowFinderError, TvMazeCatalog,
};

/// Search the TVMaze catalog for tv shows and browse their episodes
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, env = "TVMAZE_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Image URL used for shows without artwork
    #[arg(
        long,
        env = "TVMAZE_PLACEHOLDER_IMAGE",
        default_value = PLACEHOLDER_IMAGE,
        global = true
    )]
    placeholder_image: String,

    /// Timeout for a single request, in seconds
    #[arg(long, env = "TVMAZE_TIMEOUT_SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Also write the rendered page as HTML to this file
    #[arg(long, global = true)]
    html: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for shows matching a term
    Search {
        /// Free-text search term (passed to the catalog unchanged)
        term: String,
    },
    /// List the episodes of a show
    Episodes {
        /// Catalog id of the show
        show_id: u64,
    },
    /// Search and browse episodes interactively
    Browse,
}

impl Cli {
    fn config(&self) -> BrowserConfig {
        BrowserConfig {
            placeholder_image: self.placeholder_image.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..BrowserConfig::default()
        }
        .with_base_url(self.base_url.clone())
    }
}

/// Prints the page and refreshes the HTML file if one was requested
fn show_page(
    browser: &ShowBrowser<TvMazeCatalog>,
    html: Option<&PathBuf>,
) -> Result<(), ShowFinderError> {
    println!("\n{}", browser.render_text());
    if let Some(path) = html {
        browser.write_html(path)?;
    }
    Ok(())
}

/// Reports the outcome of an interactive action without ending the session
///
/// Catalog failures are already visible on the page as the error banner.
fn report(outcome: Result<RenderOutcome, ShowFinderError>) {
    match outcome {
        Ok(_) | Err(ShowFinderError::Catalog(_)) => {}
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn prompt_term(theme: &ColorfulTheme) -> Result<String, dialoguer::Error> {
    Input::<String>::with_theme(theme)
        .with_prompt("Search shows")
        .allow_empty(true)
        .interact_text()
}

fn browse(
    browser: &ShowBrowser<TvMazeCatalog>,
    html: Option<&PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let theme = ColorfulTheme::default();

    loop {
        let term = prompt_term(&theme)?;
        report(browser.submit_search(&term));
        show_page(browser, html)?;

        loop {
            let cards = browser.page().shows.cards().to_vec();
            let mut items: Vec<String> = cards
                .iter()
                .map(|card| format!("Episodes of {}", card.show.name))
                .collect();
            items.push("New search".to_string());
            items.push("Quit".to_string());

            let choice = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&items)
                .default(0)
                .interact()?;

            if choice < cards.len() {
                report(browser.open_episodes(cards[choice].handle));
                show_page(browser, html)?;
            } else if choice == cards.len() {
                break;
            } else {
                return Ok(());
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let catalog = TvMazeCatalog::from_config(&cli.config())?;
    let browser = ShowBrowser::new(catalog);
    let html = cli.html.as_ref();

    match &cli.command {
        Command::Search { term } => {
            let result = browser.submit_search(term);
            show_page(&browser, html)?;
            result?;
        }
        Command::Episodes { show_id } => {
            let result = browser.open_episodes_of_show(*show_id);
            show_page(&browser, html)?;
            result?;
        }
        Command::Browse => browse(&browser, html)?,
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
