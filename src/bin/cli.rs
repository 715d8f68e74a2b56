//! Libraria CLI
//!
//! Terminal front end for the three library views.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use libraria::{
    error::Result,
    models::{BookDetail, BookSummary, Config, CoverSize, LoadState, RecentChanges},
    pipeline::Library,
    services::QueryBuilder,
    utils::text::{format_date, join_or, truncate},
};

const DESCRIPTION_WIDTH: usize = 600;

/// Libraria - Open Library book discovery
#[derive(Parser, Debug)]
#[command(name = "libraria", version, about = "Search and explore the Open Library catalog")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "libraria.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the latest catalog edits
    Recent,

    /// Search the catalog by free text or structured fields
    Search {
        /// Free-text query
        query: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// First publication year
        #[arg(long)]
        year: Option<String>,

        /// Subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show details for a work (e.g. OL66554W or /works/OL66554W)
    Book { key: String },

    /// Validate configuration file
    Validate,

    /// Print the effective configuration as TOML
    Config,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Recent => {
            let library = Library::from_config(config)?;
            render_recent(library.load_recent_changes().await);
        }

        Command::Search {
            query,
            author,
            year,
            subject,
        } => {
            let query = match query {
                Some(query) => query,
                None => QueryBuilder {
                    author,
                    year,
                    subject,
                }
                .build()
                .unwrap_or_default(),
            };

            let library = Library::from_config(config)?;
            let covers = library.config().endpoints.covers().to_string();
            println!("Search Results");
            render_search(library.search_books(&query).await, &covers);
        }

        Command::Book { key } => {
            let library = Library::from_config(config)?;
            let covers = library.config().endpoints.covers().to_string();
            render_detail(library.load_book_detail(&key).await, &covers);
        }

        Command::Validate => {
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            println!("✓ Config OK");
            println!("    catalog: {}", config.endpoints.catalog());
            println!("    encyclopedia: {}", config.endpoints.encyclopedia());
            println!(
                "    retry: {} attempt(s), {} ms base delay",
                config.retry.max_attempts, config.retry.base_delay_ms
            );
        }

        Command::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn render_recent(state: LoadState<RecentChanges>) {
    println!("Recent Changes");
    let LoadState::Loaded(recent) = state else {
        return;
    };

    if let Some(message) = &recent.message {
        println!("! {message}");
    }
    for change in &recent.changes {
        let comment = if change.comment.is_empty() {
            "No comment"
        } else {
            change.comment.as_str()
        };
        println!("  • {comment}");
        println!(
            "    By {} on {}",
            change.author_name().unwrap_or("Unknown"),
            format_date(change.timestamp_utc())
        );
    }
}

fn render_search(state: LoadState<Vec<BookSummary>>, covers: &str) {
    match state {
        LoadState::Loaded(books) if books.is_empty() => {
            println!("No books found for your search.");
        }
        LoadState::Loaded(books) => {
            for book in &books {
                println!("  • {} [{}]", book.title, book.work_id());
                println!("    {}", join_or(&book.author_names, "Unknown"));
                println!(
                    "    {}",
                    book.first_publish_year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "N/A".to_string())
                );
                if let Some(url) = book.cover_url(covers, CoverSize::Medium) {
                    println!("    {url}");
                }
            }
        }
        LoadState::Failed(message) => println!("! {message}"),
        LoadState::Idle | LoadState::Loading => {}
    }
}

fn render_detail(state: LoadState<BookDetail>, covers: &str) {
    let detail = match state {
        LoadState::Loaded(detail) => detail,
        LoadState::Failed(message) => {
            println!("! {message}");
            return;
        }
        LoadState::Idle | LoadState::Loading => return,
    };
    let record = &detail.record;

    println!("{}", detail.title);
    println!("Author: {}", join_or(&detail.author_names, "Unknown"));
    if let Some(url) = detail.cover_url(covers, CoverSize::Large) {
        println!("Cover: {url}");
    }
    if let Some(description) = &detail.description {
        println!("Description: {}", truncate(description, DESCRIPTION_WIDTH));
    }

    for (label, values) in [
        ("Subjects", &record.subjects),
        ("Characters", &record.subject_people),
        ("Places", &record.subject_places),
        ("Time Periods", &record.subject_times),
    ] {
        if !values.is_empty() {
            println!("{label}: {}", values.join(", "));
        }
    }

    if let Some(excerpt) = detail.first_excerpt() {
        println!("“{}”", excerpt.text);
        if let Some(comment) = &excerpt.comment {
            println!("    - {comment}");
        }
    }

    if !record.links.is_empty() {
        println!("External Links:");
        for link in &record.links {
            println!("  • {} <{}>", link.title, link.url);
        }
    }

    if let Some(summary) = &detail.encyclopedia {
        println!("Wikipedia Summary: {}", summary.extract);
        if let Some(image) = &summary.image_url {
            println!("Image: {image}");
        }
        println!("Read more on Wikipedia: {}", summary.page_url);
    }
}
