//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            // Table and plain modes print the redacted TOML as-is.
            let redacted = cfg.redacted();
            let toml = redacted.to_toml()?;
            let out =
                output::render_single(&global.output, &redacted, |_| toml.clone(), |_| toml.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            let path = global.config.clone().unwrap_or_else(config::config_path);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}
