use brrtrouter_backing::cli::run_cli;
use brrtrouter_backing::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli()
}
