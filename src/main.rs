use anyhow::Result;
use clap::Parser;
use nozzle_exerciser::cli::Cli;
use nozzle_exerciser::logger::init_cli_logger;

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    // Run the main application logic from the library
    if let Err(e) = nozzle_exerciser::run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
