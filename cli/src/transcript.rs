use std::fs;
use std::path::{Path, PathBuf};

use colored::*;
use funland_core::types::{ChatMessage, MessageSource};
use log::debug;

/// File name of the persisted transcript inside the history directory
const CHAT_HISTORY_FILE: &str = "chat_history.json";

/// Path of the transcript file inside the history directory
pub fn history_file_path(history_dir: &Path) -> PathBuf {
    history_dir.join(CHAT_HISTORY_FILE)
}

/// Ordered conversation transcript.
///
/// The transcript is the single source of truth: the terminal renders from
/// it and persistence serializes it directly, so what is saved is exactly
/// what was received, never a read-back of rendered output.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning its zero-based position
    pub fn push(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn push_user(&mut self, text: &str) -> usize {
        self.push(ChatMessage::user(text))
    }

    pub fn push_bot(&mut self, text: &str, source: Option<MessageSource>) -> usize {
        self.push(ChatMessage::bot(text, source))
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Load the transcript from the history directory.
    ///
    /// A missing file is an empty transcript; a corrupt file is reported
    /// and also treated as empty.
    pub fn load(history_dir: &Path) -> Self {
        let path = history_file_path(history_dir);

        match fs::read_to_string(&path) {
            Ok(json_str) => match serde_json::from_str::<Vec<ChatMessage>>(&json_str) {
                Ok(messages) => {
                    debug!("Loaded {} messages from {}", messages.len(), path.display());
                    Self { messages }
                }
                Err(e) => {
                    eprintln!(
                        "{}: {}",
                        "Warning: Failed to parse chat history file".yellow(),
                        e
                    );
                    Self::new()
                }
            },
            Err(_) => {
                // File likely doesn't exist
                debug!("No chat history file at {}", path.display());
                Self::new()
            }
        }
    }

    /// Save the transcript to the history directory as pretty JSON
    pub fn save(&self, history_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(history_dir)?;
        let path = history_file_path(history_dir);
        let json_str = serde_json::to_string_pretty(&self.messages)?;
        fs::write(&path, json_str)?;
        debug!("Saved chat history to {}", path.display());
        Ok(())
    }

    /// Remove the persisted transcript file, if any
    pub fn delete_file(history_dir: &Path) {
        let path = history_file_path(history_dir);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!(
                    "{}: {}: {}",
                    "Warning: Failed to delete chat history file".yellow(),
                    path.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_preserves_order_and_sources() {
        let dir = tempdir().unwrap();

        let mut transcript = Transcript::new();
        transcript.push_user("Какие цены?");
        transcript.push_bot("Цены от 300 ₽.", Some(MessageSource::KnowledgeBase));
        transcript.push_user("А скидки?");
        transcript.push_bot("Сейчас уточню.", Some(MessageSource::YandexGpt));
        transcript.push_bot(
            "Извините, произошла ошибка. Попробуйте позже.",
            Some(MessageSource::Error),
        );
        transcript.save(dir.path()).unwrap();

        let loaded = Transcript::load(dir.path());
        assert_eq!(loaded.messages(), transcript.messages());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(Transcript::load(dir.path()).is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        fs::write(history_file_path(dir.path()), "not json").unwrap();
        assert!(Transcript::load(dir.path()).is_empty());
    }

    #[test]
    fn test_delete_file() {
        let dir = tempdir().unwrap();
        let mut transcript = Transcript::new();
        transcript.push_user("привет");
        transcript.save(dir.path()).unwrap();
        assert!(history_file_path(dir.path()).exists());

        Transcript::delete_file(dir.path());
        assert!(!history_file_path(dir.path()).exists());
        // Deleting again is a no-op
        Transcript::delete_file(dir.path());
    }

    #[test]
    fn test_push_returns_position() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.push_user("a"), 0);
        assert_eq!(transcript.push_bot("b", None), 1);
        assert_eq!(transcript.len(), 2);
    }
}
