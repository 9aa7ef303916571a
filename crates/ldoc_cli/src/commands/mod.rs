//! Subcommand implementations

mod init;
mod keywords;
mod locate;
mod query;
mod render;

pub use init::run_init;
pub use keywords::run_keywords;
pub use locate::run_locate;
pub use query::run_query;
pub use render::run_render;

use ldoc_core::LdocConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::Cli;

/// Loads the `--config` file, or the first config file found in the
/// working directory.
pub fn load_config(cli: &Cli) -> Result<LdocConfig> {
    if let Some(ref path) = cli.config {
        return LdocConfig::from_file(path).into_diagnostic();
    }
    find_config()
}

pub fn find_config() -> Result<LdocConfig> {
    if let Some(path) = LdocConfig::find_config(".") {
        info!("Using config: {}", path.display());
        return LdocConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LdocConfig::new())
}
