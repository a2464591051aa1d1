use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::io::{self, Write};

use crate::output;
use crate::widget::ChatWidget;

/// One parsed line of interactive input
#[derive(Debug, PartialEq)]
pub enum Command {
    Empty,
    Quit,
    Help,
    ShowMenu,
    MenuClick(usize),
    Suggestion(usize),
    Feedback { number: usize, good: bool },
    ToggleCalculator,
    Calculate { guests: u32, hours: u32, activity: String },
    Booking,
    Clear,
    Unknown(String),
    Say(String),
}

/// Parse an input line into a command; anything that is not a slash
/// command is a chat message.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }
    if input.eq_ignore_ascii_case("exit")
        || input.eq_ignore_ascii_case("quit")
        || input == "выход"
    {
        return Command::Quit;
    }
    if !input.starts_with('/') {
        return Command::Say(input.to_string());
    }

    let mut parts = input.split_whitespace();
    let head = parts.next().unwrap_or_default();
    match head {
        "/help" => Command::Help,
        "/menu" => match parts.next().and_then(|n| n.parse().ok()) {
            Some(number) => Command::MenuClick(number),
            None => Command::ShowMenu,
        },
        "/sug" => match parts.next().and_then(|n| n.parse().ok()) {
            Some(number) => Command::Suggestion(number),
            None => Command::Unknown(head.to_string()),
        },
        "/good" | "/bad" => match parts.next().and_then(|n| n.parse().ok()) {
            Some(number) => Command::Feedback {
                number,
                good: head == "/good",
            },
            None => Command::Unknown(head.to_string()),
        },
        "/calc" => {
            let args: Vec<&str> = parts.collect();
            if args.is_empty() {
                Command::ToggleCalculator
            } else {
                // Unparsable counts map to zero and are silently ignored
                // downstream, like the form's falsy-input check
                Command::Calculate {
                    guests: args.first().and_then(|v| v.parse().ok()).unwrap_or(0),
                    hours: args.get(1).and_then(|v| v.parse().ok()).unwrap_or(0),
                    activity: args.get(2).unwrap_or(&"").to_string(),
                }
            }
        }
        "/booking" => Command::Booking,
        "/clear" => Command::Clear,
        _ => Command::Unknown(head.to_string()),
    }
}

/// Runs a single query mode, sending one question and displaying the reply
pub async fn run_single_query(prompt: String, widget: &mut ChatWidget) -> Result<()> {
    info!("Running single query: {}", prompt);
    widget.send_message(&prompt, false).await;
    Ok(())
}

/// Runs an interactive chat session
pub async fn run_interactive_chat(widget: &mut ChatWidget) -> Result<()> {
    println!(
        "{}",
        "Чат-ассистент развлекательного центра Funland".cyan().bold()
    );
    println!("Введите сообщение или /help для списка команд. 'exit' — выход.");
    println!();

    widget.replay_history();
    widget.load_display_menu().await;

    loop {
        // Prompt for user input
        print!("{}: ", "Вы".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let bytes_read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;
        if bytes_read == 0 {
            break; // EOF
        }

        match parse_command(&input) {
            Command::Empty => continue,
            Command::Quit => {
                println!("До встречи в Funland!");
                break;
            }
            Command::Help => output::print_command_help(),
            Command::ShowMenu => widget.print_menu(),
            Command::MenuClick(number) => widget.handle_menu_button_click(number).await,
            Command::Suggestion(number) => widget.choose_suggestion(number).await,
            Command::Feedback { number, good } => {
                widget.submit_feedback(number, good);
            }
            Command::ToggleCalculator => widget.toggle_calculator(),
            Command::Calculate {
                guests,
                hours,
                activity,
            } => widget.submit_calculation(guests, hours, &activity),
            Command::Booking => {
                println!("Бронирование: {}", widget.booking_url().underline());
            }
            Command::Clear => widget.clear_chat(),
            Command::Unknown(command) => {
                println!(
                    "{}",
                    format!("Неизвестная команда: {}. /help — список команд.", command).dimmed()
                );
            }
            Command::Say(text) => {
                // Typing a free-form message hides the suggestion panel
                widget.hide_suggestions();
                widget.send_message(&text, false).await;
            }
        }

        println!(); // Add spacing between interactions
    }

    Ok(())
}
