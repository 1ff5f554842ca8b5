use chargers_near::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and exit
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(command) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(chargers_near::Error::processing_interrupted(
                    "Interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("chargers-near - EV Charging Station Summarizer");
    println!("==============================================");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarize chargers within 1500 m of the default address:");
    println!("    OCM_KEY=<your key> chargers-near summarize");
    println!();
    println!("    # Another address and radius:");
    println!("    chargers-near summarize -a \"Newark, NJ\" -r 3000 -k <your key>");
    println!();
    println!("    # Skip geocoding with an explicit bounding box:");
    println!("    chargers-near summarize -b \"(40.63,-74.27),(40.73,-74.09)\"");
    println!();
    println!("    # Print the bounding box chargemeup would be queried with:");
    println!("    chargers-near bounds -a \"Newark, NJ\"");
    println!();

    let mut command = Args::command();
    if let Err(e) = command.print_help() {
        eprintln!("Failed to print help: {}", e);
    }
}
