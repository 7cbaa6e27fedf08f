//! Auth and download-logs command handlers

use crate::auth::{AuthState, CredentialGate};
use crate::cli::{AuthArgs, DownloadLogsArgs};
use colored::Colorize;
use std::fs;

/// Handle `yugosm auth`
///
/// Returns the message to print on success; a rejected password is an error.
pub async fn handle_auth(args: &AuthArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.connect.load_config()?;
    crate::logging::init_tracing(&config.logging)?;

    let gate = CredentialGate::new(&config.backend)?;
    let state = gate.authenticate(&args.connect.password).await;

    match state {
        Ok(_) => Ok(format!("{} {}", "✓".green(), "Authenticated")),
        Err(e) if e.is_challenge_failure() => {
            let state = AuthState::from(e);
            Err(state
                .error
                .unwrap_or_else(|| "Authentication failed".to_string())
                .into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle `yugosm download-logs`
pub async fn handle_download_logs(
    args: &DownloadLogsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.connect.load_config()?;
    crate::logging::init_tracing(&config.logging)?;

    let gate = CredentialGate::new(&config.backend)?;
    let body = gate.download_logs(&args.connect.password).await?;

    match &args.output {
        Some(path) => {
            fs::write(path, &body)?;
            println!(
                "✓ Saved {} bytes of logs to {}",
                body.len(),
                path.display()
            );
        }
        None => print!("{}", body),
    }

    Ok(())
}
