//! # truecoach - a minimal TrueCoach API client
//!
//! Three operations, each a single HTTP round trip over `reqwest`:
//!
//! 1. [`Client::login`] exchanges an email and password for a [`SessionToken`].
//! 2. [`Client::get_user_profile`] resolves the user's client ID. User IDs and
//!    client IDs are different namespaces; habit trackers are keyed by the latter.
//! 3. [`Client::get_habit_trackers`] fetches a day's [`HabitTrackerResponse`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use truecoach::{tracker_date, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), truecoach::Error> {
//!     let client = Client::new()?;
//!
//!     let token = client.login("you@example.com", "secret").await?;
//!     let profile = client
//!         .get_user_profile(&token.access_token, token.user_id.as_str())
//!         .await?;
//!
//!     let date = tracker_date(chrono::Local::now().date_naive());
//!     let habits = client
//!         .get_habit_trackers(&token.access_token, profile.client_id.as_str(), &date)
//!         .await?;
//!
//!     for entry in &habits.trackings {
//!         if let Some(steps) = entry.steps {
//!             println!("{}: {} steps", entry.date, steps);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Identifiers
//!
//! The API sends some identifiers as JSON numbers and others as strings.
//! [`FlexibleId`] accepts both and always holds the textual form, so `12345`
//! and `"12345"` decode to the same value.
//!
//! ## Errors
//!
//! Every operation either returns a complete value or an [`Error`]. Transport
//! failures, non-2xx responses and decode failures are passed through without
//! retries or fallbacks. Rejected credentials surface as a plain
//! [`Error::HttpError`] carrying the status and body.
//!
//! ## Logging
//!
//! Requests and responses are reported through `tracing`. Passwords and access
//! tokens are never logged.

mod client;
pub mod config;
mod error;
mod metadata;
mod models;
mod response;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{
    tracker_date, DurationDescriptor, FlexibleId, HabitTrackerEntry, HabitTrackerResponse,
    SessionToken, UserProfile,
};
