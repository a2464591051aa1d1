use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Confirm;
use funland_core::client::BotClient;
use funland_core::config::WidgetConfig;
use funland_core::types::{ChatMessage, MessageSource};
use log::{error, info};
use tokio::task::JoinHandle;

use crate::calculator::PriceCalculator;
use crate::feedback::{FeedbackRecorder, feedback_value};
use crate::menu::MenuPanel;
use crate::output;
use crate::suggestions::SuggestionPanel;
use crate::transcript::Transcript;

/// Apology shown in place of a reply when the chat request fails
pub const ERROR_REPLY: &str = "Извините, произошла ошибка. Попробуйте позже.";

/// The assembled chat widget: every panel owns its own state, the
/// transcript is the single source of truth for rendering and
/// persistence. This is the surface other code embeds.
pub struct ChatWidget {
    client: BotClient,
    transcript: Transcript,
    menu: MenuPanel,
    suggestions: SuggestionPanel,
    feedback: FeedbackRecorder,
    calculator: PriceCalculator,
    history_dir: PathBuf,
    save_history: bool,
}

impl ChatWidget {
    /// Build the widget from configuration, loading the persisted chat and
    /// calculator history.
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let history_dir = config
            .history_dir()
            .context("Failed to resolve history directory")?;

        Ok(Self {
            client: BotClient::new(config),
            transcript: Transcript::load(&history_dir),
            menu: MenuPanel::new(),
            suggestions: SuggestionPanel::new(),
            feedback: FeedbackRecorder::new(),
            calculator: PriceCalculator::load(&history_dir),
            history_dir,
            save_history: config.save_history.unwrap_or(true),
        })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn menu(&self) -> &MenuPanel {
        &self.menu
    }

    pub fn suggestions(&self) -> &SuggestionPanel {
        &self.suggestions
    }

    pub fn calculator(&self) -> &PriceCalculator {
        &self.calculator
    }

    /// Booking page on the backend, the stand-in for the booking button
    pub fn booking_url(&self) -> String {
        format!("{}/booking", self.client.base_url())
    }

    /// Fetch and render the main menu. On total failure (both endpoints)
    /// the menu simply stays empty; the chat keeps working.
    pub async fn load_display_menu(&mut self) {
        match self.client.fetch_display_menu().await {
            Ok(items) => {
                info!("Loaded {} menu items", items.len());
                self.menu.set_items(items);
                print!("{}", self.menu.render());
            }
            Err(e) => {
                error!("Failed to load menu: {}", e);
            }
        }
    }

    pub fn print_menu(&self) {
        if self.menu.is_empty() {
            println!("{}", "Меню пока не загружено.".dimmed());
        } else {
            print!("{}", self.menu.render());
        }
    }

    /// Append a message to the transcript and render it
    pub fn add_message(&mut self, text: &str, is_user: bool, source: Option<MessageSource>) {
        let message = if is_user {
            ChatMessage::user(text)
        } else {
            ChatMessage::bot(text, source)
        };
        let index = self.transcript.push(message.clone());

        if message.is_user {
            output::print_user_message(&message.text);
        } else {
            output::print_bot_message(index + 1, &message);
        }
    }

    /// Send a message to the assistant.
    ///
    /// Appends the user entry, shows the typing indicator for the duration
    /// of the call and clears it on completion, success or failure. On
    /// success the reply is rendered and the transcript persisted; a
    /// failure renders the fixed apology tagged as an error instead. When
    /// `echo` is set the user entry is printed too (menu and suggestion
    /// sends; typed input is already visible on the prompt line).
    pub async fn send_message(&mut self, text: &str, echo: bool) {
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        self.transcript.push_user(&text);
        if echo {
            output::print_user_message(&text);
        }

        let spinner = output::loading_spinner();
        match self.client.send_chat(&text).await {
            Ok(reply) => {
                spinner.finish_and_clear();

                let message = ChatMessage::bot(reply.response, reply.source);
                let index = self.transcript.push(message.clone());
                output::print_bot_message(index + 1, &message);

                if !reply.suggestions.is_empty() {
                    self.suggestions.display(reply.suggestions);
                    print!("{}", self.suggestions.render());
                }

                self.persist_transcript();
            }
            Err(e) => {
                spinner.finish_and_clear();
                error!("chat request failed: {}", e);

                let message = ChatMessage::bot(ERROR_REPLY, Some(MessageSource::Error));
                let index = self.transcript.push(message.clone());
                output::print_bot_message(index + 1, &message);
            }
        }
    }

    /// Act on a menu entry: send its canned question, then show the
    /// topic's suggestions if the entry has one, else hide the panel.
    pub async fn handle_menu_button_click(&mut self, number: usize) {
        let Some(item) = self.menu.get(number).cloned() else {
            println!("{}", "Нет такого пункта меню.".dimmed());
            return;
        };

        self.send_message(&item.question, true).await;

        match item.suggestion_topic {
            Some(topic) => {
                let suggestions = match self.client.fetch_suggestions(&topic).await {
                    Ok(suggestions) => suggestions,
                    Err(e) => {
                        error!("Failed to load suggestions for '{}': {}", topic, e);
                        Vec::new()
                    }
                };
                self.suggestions.display(suggestions);
                print!("{}", self.suggestions.render());
            }
            None => self.suggestions.hide(),
        }
    }

    /// Send the question behind a displayed suggestion
    pub async fn choose_suggestion(&mut self, number: usize) {
        let Some(suggestion) = self.suggestions.get(number).cloned() else {
            println!("{}", "Нет такой подсказки.".dimmed());
            return;
        };
        self.send_message(&suggestion.question, true).await;
    }

    pub fn hide_suggestions(&mut self) {
        self.suggestions.hide();
    }

    /// Rate a bot message by its displayed number. The first rating fires
    /// one detached feedback request and marks the message rated
    /// immediately, regardless of the network outcome; later attempts on
    /// the same message send nothing. The handle is returned so callers
    /// that care (tests, shutdown) can await the request.
    pub fn submit_feedback(&mut self, number: usize, good: bool) -> Option<JoinHandle<()>> {
        let index = match number.checked_sub(1) {
            Some(index) => index,
            None => return None,
        };

        let Some(message) = self.transcript.get(index) else {
            println!("{}", "Нет такого сообщения.".dimmed());
            return None;
        };
        if !message.accepts_feedback() {
            println!("{}", "Этот ответ нельзя оценить.".dimmed());
            return None;
        }
        if !self.feedback.record(index) {
            // Already rated, the buttons are "disabled"
            return None;
        }

        // The rated message's displayed text doubles as the question key,
        // matching the original widget's payload
        let question = message.text.clone();
        let value = feedback_value(good);
        let client = self.client.clone();

        println!("{}", "Спасибо за оценку!".dimmed());
        Some(tokio::spawn(async move {
            if let Err(e) = client.send_feedback(&question, value).await {
                error!("Failed to send feedback: {}", e);
            }
        }))
    }

    /// Re-render every persisted message in stored order
    pub fn replay_history(&self) {
        for (i, message) in self.transcript.messages().iter().enumerate() {
            if message.is_user {
                output::print_user_message(&message.text);
            } else {
                output::print_bot_message(i + 1, message);
            }
        }
    }

    /// Clear the chat after interactive confirmation
    pub fn clear_chat(&mut self) {
        let confirmed = Confirm::new()
            .with_prompt("Очистить всю историю чата?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if confirmed {
            self.clear_chat_unchecked();
            println!("{}", "История чата очищена.".yellow());
        }
    }

    /// Clear the transcript, its file, the suggestion panel and the
    /// feedback state without asking (used by `--new-chat`)
    pub fn clear_chat_unchecked(&mut self) {
        self.transcript.clear();
        Transcript::delete_file(&self.history_dir);
        self.suggestions.hide();
        self.feedback.reset();
    }

    /// Toggle the calculator panel; when it opens, show the usage line and
    /// the persisted history
    pub fn toggle_calculator(&mut self) {
        if self.calculator.toggle() {
            println!("{}", "Калькулятор стоимости".cyan().bold());
            println!("Формат: /calc ГОСТИ ЧАСЫ АКТИВНОСТЬ (vr, batuts, nerf, birthday, events)");
            println!("{}", output::render_calc_history(self.calculator.history()));
        }
    }

    /// Compute and record a price quote. Zero guests or hours is a silent
    /// no-op, like the original form's falsy-input check.
    pub fn submit_calculation(&mut self, guests: u32, hours: u32, activity: &str) {
        let Some(quote) = self.calculator.submit(guests, hours, activity) else {
            return;
        };

        println!("{}", output::render_calc_result(guests, hours, activity, &quote));
        if let Err(e) = self.calculator.save(&self.history_dir) {
            error!("Failed to save calculation history: {}", e);
        }
        println!("{}", output::render_calc_history(self.calculator.history()));
    }

    fn persist_transcript(&self) {
        if !self.save_history {
            return;
        }
        if let Err(e) = self.transcript.save(&self.history_dir) {
            error!("Failed to save chat history: {}", e);
        }
    }
}
