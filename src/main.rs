use std::process::ExitCode;
use std::time::Duration;

use activity_roster_core::error::Result;
use activity_roster_core::interface::HttpClient;
use activity_roster_core::view::HtmlView;
use activity_roster_core::{
    ActionOutcome, ClientConfig, LoadSource, NoWasmClient, Roster, RosterController, SkipReason,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

/// roster: browse and change activity signups from the terminal
#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the Activity Directory API
    #[arg(long, global = true, env = "ROSTER_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ROSTER_REQUEST_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log requests and skipped actions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List activities and their participants
    List,

    /// Print the activity list and selector as HTML
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Sign a student up for an activity
    Signup {
        #[arg(short, long)]
        activity: String,

        #[arg(short, long)]
        email: String,
    },

    /// Remove a student from an activity
    Unregister {
        #[arg(short, long)]
        activity: String,

        #[arg(short, long)]
        email: String,
    },
}

type CliController = RosterController<NoWasmClient, HtmlView>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }

    let api = NoWasmClient::from_config(&config)?;
    let controller = RosterController::new(api, HtmlView::new(), config);
    let source = controller.start().await;
    if source == LoadSource::Fallback {
        eprintln!("Activity directory unavailable, showing the built-in sample roster.");
    }

    match cli.command {
        Commands::List => {
            print_roster(&controller.roster());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Render { output } => {
            let html = controller.view().to_html();
            match output {
                Some(path) => std::fs::write(&path, html)?,
                None => println!("{html}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Signup { activity, email } => {
            let outcome = controller.signup(&activity, &email).await;
            Ok(report(&controller, &outcome, &activity))
        }
        Commands::Unregister { activity, email } => {
            let outcome = controller.unregister(&activity, &email).await;
            if outcome == (ActionOutcome::Completed { notice: None }) {
                println!("Unregistered {email} from {activity}");
            }
            Ok(report(&controller, &outcome, &activity))
        }
    }
}

fn print_roster(roster: &Roster) {
    println!("============================================");
    for activity in roster {
        println!("{} [{}]", activity.title, activity.id);
        if !activity.meta.is_empty() {
            println!("  {}", activity.meta);
        }
        if let Some(left) = activity.spots_left() {
            println!("  {left} spots left");
        }
        if activity.participants.is_empty() {
            println!("  No participants yet");
        }
        for email in &activity.participants {
            println!("  - {email}");
        }
        println!("============================================");
    }
}

/// Prints the notice or skip reason and the activity's participants after
/// the action.
fn report(controller: &CliController, outcome: &ActionOutcome, activity: &str) -> ExitCode {
    if let Some(notice) = controller.notice() {
        println!("{}", notice.text);
    }

    match outcome {
        ActionOutcome::Completed { .. } => {
            if let Some(participants) = controller.view().participants(activity) {
                println!("Participants: {}", participants.join(", "));
            }
            ExitCode::SUCCESS
        }
        ActionOutcome::Failed { .. } => ExitCode::FAILURE,
        ActionOutcome::Skipped(reason) => {
            let why = match reason {
                SkipReason::MissingInput => "both an activity and an email are required",
                SkipReason::UnknownActivity => "no such activity",
                SkipReason::InFlight => "a request for this activity is already running",
            };
            eprintln!("Nothing done: {why}");
            ExitCode::FAILURE
        }
    }
}
