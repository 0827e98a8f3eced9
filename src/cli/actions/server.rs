use crate::ledger::{self, session::SessionSecret, state::AppConfig, state::AppState};
use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub secret: SessionSecret,
    pub config: AppConfig,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the shared state cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server config: {:?}", args.config);

    let state =
        AppState::new(args.config, &args.secret).context("Failed to build application state")?;

    ledger::new(args.port, state).await
}
