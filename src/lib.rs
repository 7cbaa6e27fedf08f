//! YugoSM dashboard client
//!
//! Authenticates against a monitoring backend with a shared password, then
//! follows its live feed of uptime statistics and log lines over a
//! self-healing WebSocket connection.
//!
//! - [`auth`] - the credential gate (one HTTP challenge)
//! - [`feed`] - the reconnecting live feed client
//! - [`session`] - ties authentication lifetime to the feed
//!
//! ```no_run
//! use yugosm::config::DashboardConfig;
//! use yugosm::session::Session;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(&DashboardConfig::default())?;
//! let auth = session.login("secret").await;
//! if let Some(feed) = session.feed() {
//!     let mut updates = feed.subscribe();
//!     updates.changed().await?;
//!     println!("{:?}", updates.borrow().status);
//! } else {
//!     eprintln!("{}", auth.error.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod feed;
pub mod logging;
pub mod session;
