use credo_core::TrustReport;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `credo schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schemars::schema_for!(TrustReport), flags.format)
}
