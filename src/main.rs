use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use url::Url;

use feednote::{
    DEFAULT_DATE_FORMAT, DEFAULT_MAX_ITEMS, ReqwestClient, current_timestamp, fetch_feed, marker,
};

// Emoji with fallback for terminals without Unicode support
static ANTENNA: Emoji<'_, '_> = Emoji("📡 ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");

/// Fetch an RSS/Atom feed and preview the note lines it would insert
#[derive(Parser, Debug)]
#[command(name = "feednote")]
#[command(about = "Fetch an RSS/Atom feed and preview the note lines it would insert")]
#[command(version)]
struct Args {
    /// RSS or Atom feed URL
    url: String,

    /// Date pattern for the root line timestamp (e.g. dd/MM/yyyy)
    #[arg(short = 'f', long, default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Maximum number of feed items to keep
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITEMS)]
    max_items: usize,

    /// Quiet mode - print only the note lines
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let url = Url::parse(args.url.trim()).context("invalid feed URL")?;

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            ANTENNA,
            "feednote".bold().magenta(),
            "- Feed Preview".dimmed()
        );
        println!("{SEARCH}Fetching feed: {}\n", url.as_str().cyan());
    }

    let client = ReqwestClient::new();
    let feed = fetch_feed(&client, &url, args.max_items)
        .await
        .context("failed to fetch feed")?;

    let timestamp = current_timestamp(&args.date_format);
    println!("{}", marker::root_line(&feed.title, url.as_str(), &timestamp));

    for entry in &feed.entries {
        println!("  {}", marker::child_line(&entry.title, &entry.link));
        if let Some(pub_date) = &entry.pub_date {
            println!("    {}", format!("pubDate:: {pub_date}").dimmed());
        }
    }

    if !args.quiet {
        println!(
            "\n{SUCCESS}{} {} • {} items",
            "Fetched:".bold().green(),
            feed.title.bold(),
            feed.entries.len().to_string().cyan()
        );
        if let Some(description) = &feed.description {
            println!("   {}", description.dimmed());
        }
        println!();
    }

    Ok(())
}
