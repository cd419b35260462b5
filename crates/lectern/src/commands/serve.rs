//! `lectern serve`

use std::net::SocketAddr;

use tracing::info;

use lectern::server::{self, AppState};

use crate::cli::ServeArgs;
use crate::config::{self, Config};
use crate::error::CliError;

pub async fn handle(args: ServeArgs, cfg: &Config) -> Result<(), CliError> {
    let addr = SocketAddr::new(
        args.bind.unwrap_or(cfg.server.bind),
        args.port.unwrap_or(cfg.server.port),
    );

    let service = config::content_service(cfg)?;
    let options = config::server_options(cfg);
    info!(
        quizzes_ttl_secs = options.quizzes_ttl.as_secs(),
        revalidate_secret = options.revalidate_secret.is_some(),
        "starting server"
    );

    server::serve(AppState::new(service, options), addr)
        .await
        .map_err(|source| CliError::Server {
            addr: addr.to_string(),
            source,
        })
}
