//! Command dispatch: bridges CLI args -> content service -> output formatting.

pub mod config_cmd;
pub mod content;
pub mod query;
pub mod serve;

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

/// Dispatch a command that needs the loaded configuration.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Serve(args) => serve::handle(args, cfg).await,
        Command::Query(args) => {
            let service = config::content_service(cfg)?;
            query::handle(&service, args, global).await
        }
        Command::Lesson { slug } => {
            let service = config::content_service(cfg)?;
            content::lesson(&service, &slug, global).await
        }
        Command::Quizzes => {
            let service = config::content_service(cfg)?;
            content::quizzes(&service, global).await
        }
        Command::Config(args) => config_cmd::handle(args, cfg, global),
    }
}
