//! Skills Compatibility Tester - Main CLI Application
//!
//! Checks whether a Claude-compatible API endpoint supports the Skills feature
//! and prints a pass/fail report with guidance.

use clap::Parser;
use skills_compat_tester::{app::App, cli::Cli, AppError};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let use_color = !cli.no_color;

    if let Err(e) = App::new(cli).run().await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Print helpful suggestions for startup errors
fn print_error_suggestions(error: &AppError) {
    if let AppError::Config(_) = error {
        eprintln!();
        eprintln!("Configuration help:");
        eprintln!("  - Check your .env file format (KEY=value per line)");
        eprintln!("  - The base URL must start with http:// or https://");
        eprintln!("  - Run with --help to see the supported environment variables");
    }
}
