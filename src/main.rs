use clap::Parser;
use gigsync::api::{run_sync, FailurePolicy, SyncParams};
use gigsync::calendar::api::GoogleCalendarAPI;
use gigsync::config::env_loader::load_config;
use gigsync::gateway::session::GatewaySession;
use gigsync::lastfm::api::LastFmAPI;

/// Sync a band's upcoming shows in your town to a Google Calendar.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Town whose shows should land on the calendar
    town: String,

    /// Band to look up events for
    band: String,

    /// Keep adding remaining events after a per-event failure
    #[clap(long)]
    best_effort: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.town.trim().is_empty() || args.band.trim().is_empty() {
        eprintln!("town and band must not be empty");
        std::process::exit(2);
    }

    let config = load_config();

    let session = match GatewaySession::connect(&config.gateway) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Could not open a gateway session: {}", describe(&err));
            std::process::exit(1);
        }
    };
    let lastfm = LastFmAPI::new(session.clone(), &config.lastfm);
    let google = GoogleCalendarAPI::new(session, &config.google);

    let params = SyncParams {
        town: args.town,
        band: args.band,
        calendar_name: config.calendar_name,
        policy: if args.best_effort {
            FailurePolicy::BestEffort
        } else {
            FailurePolicy::FailFast
        },
    };

    match run_sync(&lastfm, &google, &params).await {
        Ok(report) => {
            println!("{}", report.summary());

            for failure in &report.failures {
                eprintln!(
                    "Failed to add the {} show on {}: {}",
                    failure.venue, failure.date, failure.reason
                );
            }

            if !report.failures.is_empty() {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{}", describe(&err));
            std::process::exit(1);
        }
    }
}

/// Renders an error with its cause chain on one line.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();

    while let Some(err) = cause {
        message.push_str(": ");
        message.push_str(&err.to_string());
        cause = err.source();
    }

    message
}
