use clap::Parser;
use gef_reader::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) if stats.has_failures() => process::exit(1),
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("GEF Reader - CPT survey file decoder");
    println!("====================================");
    println!();
    println!("Decode cone penetration test files in the colon header and");
    println!("#TAG=value GEF dialects into header, units and measurement rows.");
    println!();
    println!("USAGE:");
    println!("    gef-reader <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse one or more files and print a summary or JSON");
    println!("    columns     Print the columns and units of a file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    gef-reader parse CPT01.GEF.txt CPT02.gef");
    println!("    gef-reader parse site/*.gef --format json --mapping names.json");
    println!("    gef-reader columns CPT02.gef --dialect tag");
    println!();
    println!("For detailed help on any command, use:");
    println!("    gef-reader <COMMAND> --help");
}
