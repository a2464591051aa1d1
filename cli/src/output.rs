use std::time::Duration;

use chrono::Local;
use colored::*;
use funland_core::types::ChatMessage;
use indicatif::{ProgressBar, ProgressStyle};
use pulldown_cmark::{Event as MdEvent, Parser as MdParser, Tag};

use crate::calculator::{CalculationEntry, PriceQuote, activity_name};

/// Current wall-clock time as shown next to each message
pub fn current_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Spinner shown while the assistant is composing a reply, the terminal
/// counterpart of the typing indicator
pub fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message("Бот печатает...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

pub fn print_user_message(text: &str) {
    println!(
        "{}: {}  {}",
        "Вы".green().bold(),
        text,
        current_time().dimmed()
    );
}

/// Print a bot message with its source label and, for rateable messages,
/// the feedback hint. `number` is the one-based transcript position used
/// to address the message in `/good N` and `/bad N`.
pub fn print_bot_message(number: usize, message: &ChatMessage) {
    println!(
        "{}: {}  {}",
        "Бот".blue().bold(),
        render_markdown(&message.text),
        current_time().dimmed()
    );

    if let Some(label) = message.source.as_ref().and_then(|s| s.label()) {
        println!("   {}", format!("Источник: {}", label).dimmed());
        println!(
            "   {}",
            format!("Оценить ответ: /good {} или /bad {}", number, number).dimmed()
        );
    }
}

/// Show usage instructions when no prompt or action is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "funland-cli \"ваш вопрос\"".green().bold());
    println!("    Отправить один вопрос ассистенту");
    println!();
    println!("  {}", "funland-cli -i".green().bold());
    println!("    Интерактивный чат с ассистентом");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --base-url <URL>     Адрес бэкенда ассистента");
    println!("  --new-chat           Начать с чистой истории");
    println!("  --help               Показать справку");
    println!();
}

/// Commands available inside the interactive session
pub fn print_command_help() {
    println!("{}", "Команды:".cyan().bold());
    println!("  /menu            показать меню");
    println!("  /menu N          выбрать пункт меню");
    println!("  /sug N           выбрать подсказку");
    println!("  /good N, /bad N  оценить ответ N");
    println!("  /calc            показать/скрыть калькулятор");
    println!("  /calc Г Ч АКТ    расчет: гости, часы, активность");
    println!("                   (vr, batuts, nerf, birthday, events)");
    println!("  /booking         ссылка на бронирование");
    println!("  /clear           очистить историю чата");
    println!("  exit             выход");
}

/// Render the assistant's lightweight Markdown (bold, italic, line
/// breaks, inline and fenced code) to styled terminal text
pub fn render_markdown(markdown: &str) -> String {
    let parser = MdParser::new(markdown);

    let mut output = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut in_code_block = false;
    let mut code_block_content = String::new();

    for event in parser {
        match event {
            MdEvent::Start(Tag::Paragraph) => {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::End(Tag::Paragraph) => {
                output.push('\n');
            }
            MdEvent::Start(Tag::Strong) => bold = true,
            MdEvent::End(Tag::Strong) => bold = false,
            MdEvent::Start(Tag::Emphasis) => italic = true,
            MdEvent::End(Tag::Emphasis) => italic = false,
            MdEvent::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                code_block_content.clear();
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::End(Tag::CodeBlock(_)) => {
                output.push_str(&"─".repeat(40).dimmed().to_string());
                output.push('\n');
                output.push_str(&code_block_content);
                if !code_block_content.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str(&"─".repeat(40).dimmed().to_string());
                output.push('\n');
                in_code_block = false;
            }
            MdEvent::Start(Tag::List(_)) => {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::Start(Tag::Item) => {
                output.push_str(&format!("{} ", "•".yellow()));
            }
            MdEvent::End(Tag::Item) => {
                output.push('\n');
            }
            MdEvent::Code(ref code) => {
                output.push_str(&code.on_bright_black().white().to_string());
            }
            MdEvent::Text(ref text) => {
                if in_code_block {
                    code_block_content.push_str(text);
                } else if bold {
                    output.push_str(&text.bold().to_string());
                } else if italic {
                    output.push_str(&text.italic().to_string());
                } else {
                    output.push_str(text);
                }
            }
            MdEvent::SoftBreak | MdEvent::HardBreak => {
                output.push('\n');
            }
            _ => {
                // Headings, tables and the rest are beyond the widget's
                // Markdown subset; their text still flows through Text events
            }
        }
    }

    output.trim_end().to_string()
}

/// Render the calculator result summary
pub fn render_calc_result(guests: u32, hours: u32, activity: &str, quote: &PriceQuote) -> String {
    format!(
        "{}\nГости: {} чел.\nВремя: {} час.\nАктивность: {}\n{}\nЦена за гостя: {} ₽/час",
        "Результат расчета:".cyan().bold(),
        guests,
        hours,
        activity_name(activity),
        format!("Итого: {} ₽", quote.total).bold(),
        quote.price_per_guest
    )
}

/// Render the calculation history list, newest first
pub fn render_calc_history(entries: &[CalculationEntry]) -> String {
    if entries.is_empty() {
        return "История расчетов пуста".dimmed().to_string();
    }

    let mut output = format!("{}", "История расчетов:".cyan().bold());
    for entry in entries {
        output.push_str(&format!(
            "\n{}: {} чел. × {} час. — {} ₽  {}",
            activity_name(&entry.activity),
            entry.guests,
            entry.hours,
            entry.total,
            entry
                .timestamp
                .with_timezone(&Local)
                .format("%d.%m.%Y")
                .to_string()
                .dimmed()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate_price;
    use chrono::Utc;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_markdown_bold_and_italic() {
        plain();
        assert_eq!(
            render_markdown("**жирный** и *курсив*"),
            "жирный и курсив"
        );
    }

    #[test]
    fn test_render_markdown_keeps_line_breaks() {
        plain();
        assert_eq!(render_markdown("первая\nвторая"), "первая\nвторая");
    }

    #[test]
    fn test_render_markdown_inline_code() {
        plain();
        assert_eq!(render_markdown("код `x = 1` готов"), "код x = 1 готов");
    }

    #[test]
    fn test_render_markdown_fenced_code() {
        plain();
        let rendered = render_markdown("до\n```\nlet x = 1;\n```");
        assert!(rendered.contains("let x = 1;"));
        assert!(rendered.starts_with("до"));
    }

    #[test]
    fn test_render_markdown_plain_text_unchanged() {
        plain();
        assert_eq!(render_markdown("Привет!"), "Привет!");
    }

    #[test]
    fn test_render_calc_result() {
        plain();
        let quote = calculate_price(3, 2, "vr");
        let rendered = render_calc_result(3, 2, "vr", &quote);
        assert!(rendered.contains("Гости: 3 чел."));
        assert!(rendered.contains("Активность: VR-зоны"));
        assert!(rendered.contains("Итого: 1800 ₽"));
        assert!(rendered.contains("Цена за гостя: 300 ₽/час"));
    }

    #[test]
    fn test_render_calc_history_empty() {
        plain();
        assert_eq!(render_calc_history(&[]), "История расчетов пуста");
    }

    #[test]
    fn test_render_calc_history_entries() {
        plain();
        let entries = vec![CalculationEntry {
            guests: 4,
            hours: 2,
            activity: "nerf".to_string(),
            total: 5600,
            timestamp: Utc::now(),
        }];
        let rendered = render_calc_history(&entries);
        assert!(rendered.contains("Нерф-арена: 4 чел. × 2 час. — 5600 ₽"));
    }
}
