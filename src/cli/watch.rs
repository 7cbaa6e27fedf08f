//! Watch command implementation

use crate::cli::output;
use crate::cli::WatchArgs;
use crate::feed::FeedState;
use crate::session::Session;
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.connect.load_config()?;
    crate::logging::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    let monitor = config.monitor.as_ref().map(|m| m.describe());
    let mut session = Session::new(&config)?;

    let auth = session.login(&args.connect.password).await;
    if !auth.is_authenticated {
        let message = auth
            .error
            .unwrap_or_else(|| "Authentication failed".to_string());
        return Err(message.into());
    }

    let mut updates = session
        .feed()
        .ok_or("live feed did not start")?
        .subscribe();

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    if !args.json {
        let state = updates.borrow_and_update().clone();
        draw(&state, &args, monitor.as_deref())?;
    }

    // Relative "last updated" text ages between frames
    let mut tick = tokio::time::interval(REDRAW_INTERVAL);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tick.reset();

    loop {
        let event = tokio::select! {
            _ = cancel_token.cancelled() => break,
            changed = updates.changed() => Event::Changed(changed.is_ok()),
            _ = tick.tick(), if !args.json => Event::Tick,
        };

        match event {
            Event::Changed(false) => break,
            Event::Changed(true) => {
                let state = updates.borrow_and_update().clone();
                if args.json {
                    println!("{}", output::format_feed_json(&state)?);
                } else {
                    draw(&state, &args, monitor.as_deref())?;
                }
            }
            Event::Tick => {
                let state = updates.borrow().clone();
                draw(&state, &args, monitor.as_deref())?;
            }
        }
    }

    session.logout().await;
    Ok(())
}

enum Event {
    /// Feed state changed; false once the feed is gone
    Changed(bool),
    Tick,
}

fn draw(state: &FeedState, args: &WatchArgs, monitor: Option<&str>) -> std::io::Result<()> {
    render(&output::format_dashboard(
        state,
        args.tail,
        monitor,
        chrono::Utc::now(),
    ))
}

/// Clear the terminal and draw one frame.
fn render(screen: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\x1B[2J\x1B[H{}", screen)?;
    stdout.flush()
}
