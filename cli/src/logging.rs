use colored::*;
use std::env;

// Simple logging functions for user-facing diagnostics; the `log` crate
// handles the structured log stream

pub fn log_info(message: &str) {
    if env::var("FUNLAND_DEBUG").is_ok() {
        eprintln!("{} {}", "[INFO]".cyan(), message);
    }
}

pub fn log_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
