//! xpost - Publish pre-authored posts to X, immediately or on a schedule
//!
//! Immediate mode picks one post from a category (by index or at random)
//! and publishes it. Scheduled mode fires at fixed daily times, rotating
//! through content categories round-robin and advancing each category's
//! post cursor once per completed rotation.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use libxpost::config::Credentials;
use libxpost::content::ContentDb;
use libxpost::error::ConfigError;
use libxpost::platforms::x::XClient;
use libxpost::platforms::Platform;
use libxpost::publisher::{Outcome, Publisher};
use libxpost::rotation::{RotationState, Tick};
use libxpost::scheduling::{parse_times, Clock, DailySchedule, SystemClock};
use libxpost::Result;

#[derive(Parser, Debug)]
#[command(name = "xpost")]
#[command(version)]
#[command(about = "Automate X posts from a category database")]
#[command(long_about = "\
xpost - Automate X posts based on a category or schedule

DESCRIPTION:
    Reads a content database (a JSON object mapping category names to
    arrays of post texts) and publishes to X with OAuth 1.0a user-context
    credentials taken from the environment (CONSUMER_KEY, CONSUMER_SECRET,
    ACCESS_TOKEN, ACCESS_TOKEN_SECRET). A .env file in the working
    directory is loaded if present.

USAGE:
    # Post one random item from a category
    xpost --category tech

    # Post a specific item
    xpost --category tech --index 2

    # See what would go out without posting
    xpost --category tech --dry-run

    # Rotate through all categories at fixed daily times
    xpost --run-schedule --schedule-times 09:00,18:00

EXIT CODES:
    0 - Success (including a reported-but-non-fatal publish failure)
    1 - Configuration, content file, or platform error
    2 - Authentication rejected
    3 - Invalid category/index/schedule input
")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["category", "run_schedule"]),
))]
struct Cli {
    /// The category to post from immediately
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Index of the post to select (0-based). Random if not specified
    #[arg(long, value_name = "INT")]
    index: Option<usize>,

    /// Simulate posting without actually posting
    #[arg(long)]
    dry_run: bool,

    /// Run scheduled posting
    #[arg(long)]
    run_schedule: bool,

    /// Comma-separated list of posting times (HH:MM)
    #[arg(long, value_name = "TIMES", default_value = "09:00,12:00,15:00,18:00")]
    schedule_times: String,

    /// Path to the content database
    #[arg(long, value_name = "PATH", default_value = "content.json")]
    content: PathBuf,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libxpost::logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials::from_env()?;
    let db = ContentDb::load(&cli.content)?;

    // Validate operator input before going anywhere near the network
    enum Mode {
        Immediate { text: String },
        Scheduled { times: Vec<chrono::NaiveTime> },
    }

    let mode = if cli.run_schedule {
        Mode::Scheduled {
            times: parse_times(&cli.schedule_times)?,
        }
    } else if let Some(category) = &cli.category {
        Mode::Immediate {
            text: db.select(category, cli.index)?.to_string(),
        }
    } else {
        // clap's mode group makes this unreachable
        return Err(ConfigError::MissingMode.into());
    };

    let mut platform = XClient::new(credentials);
    platform.authenticate().await?;
    if let Some(name) = platform.account_name() {
        println!("Authenticated as {}", name);
    }

    let publisher = Publisher::new(Box::new(platform), cli.dry_run);

    match mode {
        Mode::Immediate { text } => {
            report(publisher.publish(&text).await, &text);
            Ok(())
        }
        Mode::Scheduled { times } => run_schedule(times, db, publisher).await,
    }
}

/// Print the operator-facing result of one publish attempt
fn report(outcome: Outcome, text: &str) {
    match outcome {
        Outcome::Posted { .. } => println!("Successfully posted: {}", text),
        Outcome::DryRun => println!("Would post: {}", text),
        Outcome::Failed { message } => eprintln!("Error posting to X: {}", message),
    }
}

/// The scheduled-mode poll loop; runs until the process is terminated
async fn run_schedule(
    times: Vec<chrono::NaiveTime>,
    db: ContentDb,
    publisher: Publisher,
) -> Result<()> {
    let clock = SystemClock;
    let mut schedule = DailySchedule::new(times, clock.now());
    let mut state = RotationState::new(&db);

    let listed = schedule
        .times()
        .iter()
        .map(|t| t.format("%H:%M").to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Scheduled posting at {} daily.", listed);
    info!(dry_run = publisher.dry_run(), "Entering schedule loop");

    loop {
        for time in schedule.due(clock.now()) {
            debug!("Slot {} is due", time.format("%H:%M"));
            match state.tick(&db) {
                Some(Tick::Post { category, text }) => {
                    info!(category = %category, "Publishing scheduled post");
                    report(publisher.publish(&text).await, &text);
                }
                Some(Tick::Empty { category }) => {
                    println!("No posts for category {}", category);
                }
                None => {
                    warn!("Content database has no categories; nothing to publish");
                }
            }
        }

        sleep(Duration::from_secs(1)).await;
    }
}
