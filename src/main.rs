use anyhow::Result;
use strikelog::cli::run_cli;
use tracing::error;


fn main() -> Result<()> {

    run_cli().inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(())
}
