use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use podfront::{
    DirFragmentSource, Document, FragmentSource, HttpFragmentSource, MemoryDocument, NoopReporter,
    Page, ReqwestClient, SharedStatusReporter, SimulatedAudio, Site, SiteConfig, StatusEvent,
    StatusReporter, is_url,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static COMPASS: Emoji<'_, '_> = Emoji("🧭 ", "[>] ");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Number of episodes listed in the summary
const SUMMARY_EPISODES: usize = 5;

/// Render a page of the podcast site from its RSS feed
#[derive(Parser, Debug)]
#[command(name = "podfront")]
#[command(about = "Render a page of the podcast site from its RSS feed")]
#[command(version)]
struct Args {
    /// RSS feed URL or path to local RSS file (overrides the config)
    feed: Option<String>,

    /// Directory or base URL holding the page fragments
    #[arg(long, default_value = ".")]
    pages: String,

    /// Location to load, e.g. `/sobre` or `/?p=/episodios`
    #[arg(long, default_value = "/")]
    path: String,

    /// TOML site configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the content region HTML instead of a summary
    #[arg(long)]
    html: bool,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Status reporter using an indicatif spinner for terminal output
struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let style = ProgressStyle::with_template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl StatusReporter for SpinnerReporter {
    fn report(&self, event: StatusEvent) {
        match event {
            StatusEvent::NavigatingTo { path } => {
                self.bar
                    .set_message(format!("{COMPASS}Loading page: {}", path.cyan()));
            }

            StatusEvent::PageLoaded { path, found } => {
                if found {
                    self.bar
                        .println(format!("{SUCCESS}Page {}", path.green()));
                } else {
                    self.bar.println(format!(
                        "{FAILURE}Page {} could not be loaded",
                        path.red()
                    ));
                }
            }

            StatusEvent::FetchingFeed { source } => {
                self.bar
                    .set_message(format!("{SEARCH}Fetching feed: {}", source.cyan()));
            }

            StatusEvent::FeedRendered {
                podcast_title,
                total_episodes,
            } => {
                self.bar.set_message(format!(
                    "{HEADPHONES}{} • {} episodes",
                    podcast_title.bold().green(),
                    total_episodes.to_string().cyan()
                ));
            }

            StatusEvent::FeedFailed { message, error } => {
                self.bar.println(format!(
                    "{FAILURE}{} - {}",
                    message.red(),
                    error.dimmed()
                ));
            }

            StatusEvent::PlaybackFailed { message } => {
                self.bar.println(format!("{FAILURE}{}", message.red()));
            }
        }
    }
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let kept: String = title.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

async fn run<F: FragmentSource>(
    config: SiteConfig,
    client: ReqwestClient,
    fragments: F,
    args: &Args,
    reporter: SharedStatusReporter,
    spinner: Option<&SpinnerReporter>,
) -> Result<Page> {
    let document = MemoryDocument::with_elements([config.content_region.as_str()]);
    let region = config.content_region.clone();

    let mut site = Site::new(
        config,
        client,
        fragments,
        SimulatedAudio::new(),
        document,
        reporter,
    );
    let page = site.start(&args.path).await;
    if let Some(spinner) = spinner {
        spinner.finish();
    }

    if args.html {
        if !site.document().contains(&region) {
            anyhow::bail!("Content region #{region} missing from document");
        }
        print!("{}", site.document().inner_html(&region).unwrap_or_default());
        return Ok(page);
    }

    if args.quiet {
        return Ok(page);
    }

    println!(
        "\n{FOLDER}Page: {} {}",
        page.path.cyan().bold(),
        if page.found {
            "(loaded)".green()
        } else {
            "(not found)".red()
        }
    );

    if let Some(podcast) = site.podcast() {
        println!(
            "{HEADPHONES}{} • {} episodes",
            podcast.title.bold().green(),
            podcast.episodes.len().to_string().cyan()
        );
        for episode in podcast.episodes.iter().take(SUMMARY_EPISODES) {
            println!(
                "  {} {} {}",
                episode.display_date().dimmed(),
                truncate_title(&episode.title, 60),
                episode.formatted_duration().yellow()
            );
        }
    }
    println!();

    Ok(page)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(feed) = &args.feed {
        config.feed = feed.clone();
    }

    let show_progress = !args.quiet && !args.html;
    if show_progress {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podfront".bold().magenta(),
            "- Podcast Site".dimmed()
        );
    }

    let spinner = show_progress.then(|| Arc::new(SpinnerReporter::new()));
    let reporter: SharedStatusReporter = match &spinner {
        Some(spinner) => Arc::clone(spinner) as SharedStatusReporter,
        None => NoopReporter::shared(),
    };

    let client = ReqwestClient::new();
    let page = if is_url(&args.pages) {
        let fragments = HttpFragmentSource::new(client.clone(), &args.pages)
            .with_context(|| format!("Invalid pages URL {}", args.pages))?;
        run(config, client, fragments, &args, reporter, spinner.as_deref()).await?
    } else {
        let fragments = DirFragmentSource::new(&args.pages);
        run(config, client, fragments, &args, reporter, spinner.as_deref()).await?
    };

    if !page.found {
        anyhow::bail!("Page {} could not be loaded", page.path);
    }

    Ok(())
}
