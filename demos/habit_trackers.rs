//! Logs in, resolves the client ID and prints a day's habit trackers.
//!
//! Run with:
//!
//! ```text
//! TRUECOACH_EMAIL=you@example.com TRUECOACH_PASSWORD=secret \
//!     cargo run --example habit_trackers
//! ```
//!
//! `TRUECOACH_DATE` selects the day, e.g. `Feb 1, 2026` (default: today).

use std::process::ExitCode;
use truecoach::{tracker_date, Client, Error};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truecoach=info,habit_trackers=info".into()),
        )
        .init();

    let (email, password) = match (
        std::env::var("TRUECOACH_EMAIL"),
        std::env::var("TRUECOACH_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            eprintln!("TRUECOACH_EMAIL and TRUECOACH_PASSWORD must be set");
            return ExitCode::FAILURE;
        }
    };

    let date = std::env::var("TRUECOACH_DATE")
        .ok()
        .filter(|date| !date.is_empty())
        .unwrap_or_else(|| tracker_date(chrono::Local::now().date_naive()));

    match run(&email, &password, &date).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(email: &str, password: &str, date: &str) -> Result<(), String> {
    let client = Client::new().map_err(|e: Error| format!("Client setup failed: {}", e))?;

    println!("Logging in...");
    let token = client
        .login(email, password)
        .await
        .map_err(|e| format!("Login failed: {}", e))?;
    println!("Logged in (user_id={})", token.user_id);

    println!("Fetching user profile...");
    let profile = client
        .get_user_profile(&token.access_token, token.user_id.as_str())
        .await
        .map_err(|e| format!("GetUserProfile failed: {}", e))?;
    let client_id = profile.client_id;
    println!("Client ID: {}", client_id);

    println!("Fetching habit trackers for client {} on {}...", client_id, date);
    let habits = client
        .get_habit_trackers(&token.access_token, client_id.as_str(), date)
        .await
        .map_err(|e| format!("GetHabitTrackers failed: {}", e))?;

    println!(
        "Found {} tracking(s), is_previous={}",
        habits.trackings.len(),
        habits.is_previous
    );
    for (i, entry) in habits.trackings.iter().enumerate() {
        println!(
            "  [{}] id={} date={} client_id={}",
            i + 1,
            entry.id,
            entry.date,
            entry.client_id
        );
        if let Some(weight) = entry.weight {
            println!("       weight={:.2}", weight);
        }
        if let Some(steps) = entry.steps {
            println!("       steps={}", steps);
        }
        if let Some(notes) = entry.notes.as_deref().filter(|notes| !notes.is_empty()) {
            println!("       notes={}", notes);
        }
    }

    Ok(())
}
