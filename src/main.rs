use anyhow::Context;
use clap::Parser;
use contact_etl::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let result = commands::run(command).context("contact-etl failed");

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Contact ETL - Contact List Cleaning Tool");
    println!("========================================");
    println!();
    println!("Clean tabular contact lists (CSV or single-sheet XLSX) into a reconciled,");
    println!("deduplicated CSV ready to load into a dialer or CRM.");
    println!();
    println!("USAGE:");
    println!("    contact-etl <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Run the cleaning pipeline over a contact file (main command)");
    println!("    preview     Show indexed headers and the first rows of a file");
    println!("    stages      List the available pipeline stages");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Clean a list with the default pipeline:");
    println!("    contact-etl process leads.csv");
    println!();
    println!("    # Find column indices, then drop some before cleaning:");
    println!("    contact-etl preview leads.xlsx -n 10");
    println!("    contact-etl process leads.xlsx \\");
    println!("        --steps drop-columns:9,10,12,clean-names,normalize-phones,final-validate");
    println!();
    println!("    # Write the summary report and removed rows alongside the output:");
    println!("    contact-etl process leads.csv --report --dropped --output-dir cleaned/");
    println!();
    println!("For detailed help on any command, use:");
    println!("    contact-etl <COMMAND> --help");
}
