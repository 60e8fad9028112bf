//! `torchenv help-ini` command

use anyhow::Result;

use torchenv::core::attributes::format_help;

pub fn execute() -> Result<()> {
    print!("{}", format_help());
    Ok(())
}
