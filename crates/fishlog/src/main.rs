use clap::Parser;
use fishlog::runtime::{boot, cli::Cli, error::RunError, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let cli = Cli::parse();
    let session = boot::boot(&cli)?;
    match run::run(session, cli.inputs).await {
        // Exit right away; a pending blocking stdin read would hold up runtime shutdown
        Err(RunError::Cancelled { .. }) => std::process::exit(130),
        result => result?,
    }
    Ok(())
}
