use credo_config::CredoConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `credo config`.
pub fn handle(config: &CredoConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&config.redacted(), flags.format)
}
