use serde::{Deserialize, Serialize};

/// A server-supplied main-menu entry driving a canned question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub text: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_topic: Option<String>,
}

/// Menu entry shape returned by the legacy `/menu-items` endpoint.
///
/// Older admin exports label entries with `admin_text` instead of `text`
/// and may omit the suggestion topic entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMenuItem {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub admin_text: Option<String>,
    pub question: String,
    #[serde(default)]
    pub suggestion_topic: Option<String>,
}

impl RawMenuItem {
    /// Convert a legacy entry, defaulting a missing label to an empty
    /// string and a missing topic to `"default"`.
    pub fn into_menu_item(self) -> MenuItem {
        MenuItem {
            text: self.text.or(self.admin_text).unwrap_or_default(),
            question: self.question,
            suggestion_topic: Some(
                self.suggestion_topic
                    .unwrap_or_else(|| "default".to_string()),
            ),
        }
    }
}

/// A contextual follow-up question offered after a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub question: String,
}

/// Wrapper shape of `/suggestions/{topic}` responses
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Request body for POST `/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body of POST `/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub source: Option<MessageSource>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Request body for POST `/feedback`; `feedback` is 1 (helpful) or 0 (not)
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub feedback: u8,
}

/// Origin tag attached to a bot message.
///
/// `knowledge_base` and `yandex_gpt` come from the server; `error` is
/// assigned client-side to the fixed apology message. Any other server
/// string is preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageSource {
    KnowledgeBase,
    YandexGpt,
    Error,
    Other(String),
}

impl MessageSource {
    pub fn as_str(&self) -> &str {
        match self {
            MessageSource::KnowledgeBase => "knowledge_base",
            MessageSource::YandexGpt => "yandex_gpt",
            MessageSource::Error => "error",
            MessageSource::Other(s) => s,
        }
    }

    /// Human-readable source label, `None` for the client-side error tag.
    ///
    /// Anything the server sent that is not the knowledge base is labelled
    /// as the generative model, matching the original two-way display.
    pub fn label(&self) -> Option<&str> {
        match self {
            MessageSource::KnowledgeBase => Some("База знаний"),
            MessageSource::Error => None,
            _ => Some("Yandex GPT"),
        }
    }
}

impl From<String> for MessageSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "knowledge_base" => MessageSource::KnowledgeBase,
            "yandex_gpt" => MessageSource::YandexGpt,
            "error" => MessageSource::Error,
            _ => MessageSource::Other(value),
        }
    }
}

impl From<MessageSource> for String {
    fn from(value: MessageSource) -> Self {
        value.as_str().to_string()
    }
}

/// One persisted transcript entry.
///
/// Field names on disk match the original storage format (`isUser`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MessageSource>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            source: None,
        }
    }

    pub fn bot(text: impl Into<String>, source: Option<MessageSource>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            source,
        }
    }

    /// Whether this message can accept a rating: bot-authored, with a
    /// server-supplied source (the apology message is not rateable).
    pub fn accepts_feedback(&self) -> bool {
        !self.is_user
            && self
                .source
                .as_ref()
                .map(|s| *s != MessageSource::Error)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_menu_item_defaults() {
        let raw = RawMenuItem {
            text: None,
            admin_text: None,
            question: "Какие цены?".to_string(),
            suggestion_topic: None,
        };
        let item = raw.into_menu_item();
        assert_eq!(item.text, "");
        assert_eq!(item.question, "Какие цены?");
        assert_eq!(item.suggestion_topic.as_deref(), Some("default"));
    }

    #[test]
    fn test_raw_menu_item_prefers_text_over_admin_text() {
        let raw = RawMenuItem {
            text: Some("Цены".to_string()),
            admin_text: Some("Цены (админ)".to_string()),
            question: "q".to_string(),
            suggestion_topic: Some("prices".to_string()),
        };
        let item = raw.into_menu_item();
        assert_eq!(item.text, "Цены");
        assert_eq!(item.suggestion_topic.as_deref(), Some("prices"));
    }

    #[test]
    fn test_raw_menu_item_admin_text_fallback() {
        let raw = RawMenuItem {
            text: None,
            admin_text: Some("Бронирование".to_string()),
            question: "q".to_string(),
            suggestion_topic: None,
        };
        assert_eq!(raw.into_menu_item().text, "Бронирование");
    }

    #[test]
    fn test_message_source_round_trip() {
        for raw in ["knowledge_base", "yandex_gpt", "error", "gigachat"] {
            let source = MessageSource::from(raw.to_string());
            assert_eq!(source.as_str(), raw);
        }
        assert_eq!(
            MessageSource::from("knowledge_base".to_string()),
            MessageSource::KnowledgeBase
        );
    }

    #[test]
    fn test_message_source_labels() {
        assert_eq!(
            MessageSource::KnowledgeBase.label(),
            Some("База знаний")
        );
        assert_eq!(MessageSource::YandexGpt.label(), Some("Yandex GPT"));
        assert_eq!(
            MessageSource::Other("gigachat".to_string()).label(),
            Some("Yandex GPT")
        );
        assert_eq!(MessageSource::Error.label(), None);
    }

    #[test]
    fn test_chat_message_storage_format() {
        let message = ChatMessage::bot("Привет!", Some(MessageSource::KnowledgeBase));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["isUser"], false);
        assert_eq!(json["source"], "knowledge_base");

        let parsed: ChatMessage =
            serde_json::from_str(r#"{"text":"hi","isUser":true}"#).unwrap();
        assert!(parsed.is_user);
        assert!(parsed.source.is_none());
    }

    #[test]
    fn test_accepts_feedback() {
        assert!(ChatMessage::bot("a", Some(MessageSource::YandexGpt)).accepts_feedback());
        assert!(ChatMessage::bot("a", Some(MessageSource::KnowledgeBase)).accepts_feedback());
        assert!(!ChatMessage::bot("a", Some(MessageSource::Error)).accepts_feedback());
        assert!(!ChatMessage::bot("a", None).accepts_feedback());
        assert!(!ChatMessage::user("a").accepts_feedback());
    }

    #[test]
    fn test_chat_reply_defaults() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"ok"}"#).unwrap();
        assert!(reply.source.is_none());
        assert!(reply.suggestions.is_empty());
    }
}
