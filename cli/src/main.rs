use clap::Parser;
use colored::*;
use funland_core::config::{WidgetConfig, get_default_config_file};
use log::LevelFilter;
use std::error::Error;

mod app;
mod calculator;
mod cli;
mod feedback;
mod logging;
mod menu;
mod output;
mod suggestions;
mod transcript;
mod widget;

use crate::cli::Args;
use crate::logging::{log_error, log_info};
use crate::output::print_usage_instructions;
use crate::widget::ChatWidget;

/// Main function - builds the chat widget and dispatches on the arguments
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load configuration
    let config = WidgetConfig::load();

    // Get log level from config or use default
    let log_level = config
        .log_level
        .as_deref()
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Warn,
        })
        .unwrap_or(LevelFilter::Warn);

    // Initialize logger with configured log level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.to_string()),
    )
    .init();

    // Parse command-line arguments
    let args = Args::parse();

    // Command-line flags override the config file
    let overrides = WidgetConfig {
        base_url: args.base_url.clone(),
        history_dir: args.history_dir.clone(),
        log_level: None,
        save_history: None,
    };
    let config = config.merge(&overrides);

    if args.save_config {
        match get_default_config_file() {
            Ok(path) => match config.save_to_file(&path) {
                Ok(()) => println!("Конфигурация сохранена: {}", path.display()),
                Err(e) => log_error(&format!("Failed to save config: {}", e)),
            },
            Err(e) => log_error(&format!("Failed to resolve config path: {}", e)),
        }
    }

    // Initialize the widget, loading persisted history
    let mut widget = match ChatWidget::new(&config) {
        Ok(widget) => widget,
        Err(e) => {
            log_error(&format!("Failed to initialize chat widget: {}", e));
            eprintln!("{}", format!("Error initializing chat widget: {}", e).red());
            return Err(e.into());
        }
    };

    if args.new_chat {
        widget.clear_chat_unchecked();
        log_info("Starting a new chat as requested");
    }

    // Call app logic based on arguments
    if args.interactive {
        if let Err(e) = app::run_interactive_chat(&mut widget).await {
            log_error(&format!("Error in interactive chat: {}", e));
            eprintln!("{}", format!("Interactive chat failed: {}", e).red());
        }
    } else if let Some(prompt) = args.prompt.clone() {
        if let Err(e) = app::run_single_query(prompt, &mut widget).await {
            log_error(&format!("Error processing prompt: {}", e));
            eprintln!("{}", format!("Request failed: {}", e).red());
        }
    } else {
        // No prompt and not interactive, show usage
        print_usage_instructions();
    }

    Ok(())
}
