use log::warn;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::WidgetConfig;
use crate::errors::{WidgetError, WidgetResult};
use crate::types::*;

/// Client for the assistant backend HTTP API
#[derive(Debug, Clone)]
pub struct BotClient {
    client: Client,
    base_url: String,
}

impl BotClient {
    /// Create a new client from the widget configuration
    pub fn new(config: &WidgetConfig) -> Self {
        Self::from_base_url(&config.base_url())
    }

    /// Create a new client talking to the given base URL
    pub fn from_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> WidgetResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| WidgetError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(WidgetError::HttpError {
                status_code: status.as_u16(),
                message: format!("GET {} failed: {}", path, error_body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WidgetError::ParsingError(format!("Failed to parse response: {}", e)))
    }

    /// Fetch the display menu.
    ///
    /// Tries `/api/menu-display` first; on any transport or parse failure
    /// it falls back to the legacy `/menu-items` endpoint, converting the
    /// legacy shape with its defaulting rules. An error is returned only
    /// when both endpoints fail.
    pub async fn fetch_display_menu(&self) -> WidgetResult<Vec<MenuItem>> {
        match self.get_json::<Vec<MenuItem>>("/api/menu-display").await {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("menu-display endpoint failed ({}), trying fallback", e);
                let raw = self.get_json::<Vec<RawMenuItem>>("/menu-items").await?;
                Ok(raw.into_iter().map(RawMenuItem::into_menu_item).collect())
            }
        }
    }

    /// Fetch the suggestion set for a topic
    pub async fn fetch_suggestions(&self, topic: &str) -> WidgetResult<Vec<Suggestion>> {
        let response = self
            .get_json::<SuggestionsResponse>(&format!("/suggestions/{}", topic))
            .await?;
        Ok(response.suggestions)
    }

    /// Send a chat message and return the assistant's reply
    pub async fn send_chat(&self, message: &str) -> WidgetResult<ChatReply> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .client
            .post(self.url("/chat"))
            .json(&request)
            .send()
            .await
            .map_err(|e| WidgetError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                WidgetError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(WidgetError::HttpError {
                status_code: status.as_u16(),
                message: format!("chat request failed: {}", error_body),
            });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| WidgetError::ParsingError(format!("Failed to parse response: {}", e)))
    }

    /// Post a binary rating for a previously answered question.
    ///
    /// The response body is ignored; callers treat this as fire-and-forget.
    pub async fn send_feedback(&self, question: &str, feedback: u8) -> WidgetResult<()> {
        let request = FeedbackRequest {
            question: question.to_string(),
            feedback,
        };

        let response = self
            .client
            .post(self.url("/feedback"))
            .json(&request)
            .send()
            .await
            .map_err(|e| WidgetError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::HttpError {
                status_code: status.as_u16(),
                message: "feedback request failed".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_display_menu_primary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu-display"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"text": "Цены", "question": "Какие цены?", "suggestion_topic": "prices"},
                {"text": "Режим работы", "question": "Когда вы работаете?"}
            ])))
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        let menu = client.fetch_display_menu().await.unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].text, "Цены");
        assert_eq!(menu[0].suggestion_topic.as_deref(), Some("prices"));
        assert!(menu[1].suggestion_topic.is_none());
    }

    #[tokio::test]
    async fn test_fetch_display_menu_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu-display"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/menu-items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"admin_text": "VR-зоны", "question": "Расскажите про VR"},
                {"question": "Как добраться?"}
            ])))
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        let menu = client.fetch_display_menu().await.unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].text, "VR-зоны");
        assert_eq!(menu[0].suggestion_topic.as_deref(), Some("default"));
        assert_eq!(menu[1].text, "");
        assert_eq!(menu[1].suggestion_topic.as_deref(), Some("default"));
    }

    #[tokio::test]
    async fn test_fetch_display_menu_both_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu-display"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/menu-items"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        assert!(client.fetch_display_menu().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/suggestions/prices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "suggestions": [
                    {"text": "Скидки", "question": "Есть ли скидки?"}
                ]
            })))
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        let suggestions = client.fetch_suggestions("prices").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].question, "Есть ли скидки?");
    }

    #[tokio::test]
    async fn test_send_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"message": "Какие цены?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Цены от 300 ₽.",
                "source": "knowledge_base",
                "suggestions": [{"text": "Скидки", "question": "Есть ли скидки?"}]
            })))
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        let reply = client.send_chat("Какие цены?").await.unwrap();

        assert_eq!(reply.response, "Цены от 300 ₽.");
        assert_eq!(reply.source, Some(MessageSource::KnowledgeBase));
        assert_eq!(reply.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_send_chat_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        match client.send_chat("привет").await {
            Err(WidgetError::HttpError { status_code, .. }) => assert_eq!(status_code, 502),
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_feedback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .and(body_json(json!({"question": "Какие цены?", "feedback": 1})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = BotClient::from_base_url(&server.uri());
        client.send_feedback("Какие цены?", 1).await.unwrap();
    }
}
