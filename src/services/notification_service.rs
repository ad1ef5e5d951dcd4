use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{WatchError, WatchResult};

/// The only acknowledgement code the push service answers with on success.
const ACK_SUCCESS: i64 = 200;

#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Attempt exactly one delivery of a formatted message.
    fn send(&self, title: &str, body: &str) -> WatchResult<()>;
}

#[derive(Serialize)]
struct PushRequest<'a> {
    token: &'a str,
    title: &'a str,
    content: &'a str,
    topic: &'a str,
    template: &'a str,
}

#[derive(Debug, Deserialize)]
struct PushAck {
    code: i64,
    #[serde(default)]
    msg: String,
}

/// PushPlus-style webhook sink.
pub struct NotificationService {
    client: Client,
    api_url: String,
    token: Option<String>,
    topic: String,
}

impl NotificationService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url: config.push_api_url.clone(),
            token: config.push_token.clone(),
            topic: config.push_topic.clone(),
        }
    }
}

impl NotificationSink for NotificationService {
    fn send(&self, title: &str, body: &str) -> WatchResult<()> {
        let token = self
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(WatchError::MissingCredential)?;

        let request = PushRequest {
            token,
            title,
            content: body,
            topic: &self.topic,
            template: "html",
        };

        // One attempt; the acknowledgement code in the body is the success
        // signal, not the HTTP status.
        let response = self.client.post(&self.api_url).json(&request).send()?;
        let ack: PushAck = response
            .json()
            .map_err(|e| WatchError::Notification(format!("unreadable acknowledgement: {e}")))?;

        check_ack(&ack)
    }
}

fn check_ack(ack: &PushAck) -> WatchResult<()> {
    if ack.code == ACK_SUCCESS {
        Ok(())
    } else {
        Err(WatchError::Notification(format!(
            "service answered code {}: {}",
            ack.code, ack.msg
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    fn config_with_token(token: Option<&str>) -> Config {
        Config {
            feed_urls: vec!["https://example.com/feed".to_string()],
            push_token: token.map(|t| t.to_string()),
            push_topic: "topic".to_string(),
            push_api_url: "http://127.0.0.1:1/send".to_string(),
            mymemory_api_url: String::new(),
            google_api_url: String::new(),
            target_lang: "zh-CN".to_string(),
            db_path: ":memory:".to_string(),
            pipeline: PipelineConfig::default(),
        }
    }

    #[test]
    fn test_missing_token_is_a_precondition_failure() {
        let service = NotificationService::new(&config_with_token(None));
        assert!(matches!(
            service.send("title", "body"),
            Err(WatchError::MissingCredential)
        ));
    }

    #[test]
    fn test_blank_token_is_a_precondition_failure() {
        let service = NotificationService::new(&config_with_token(Some("")));
        assert!(matches!(
            service.send("title", "body"),
            Err(WatchError::MissingCredential)
        ));
    }

    #[test]
    fn test_ack_success_code() {
        let ack = PushAck {
            code: 200,
            msg: "ok".to_string(),
        };
        assert!(check_ack(&ack).is_ok());
    }

    #[test]
    fn test_ack_any_other_code_fails() {
        let ack = PushAck {
            code: 500,
            msg: "invalid token".to_string(),
        };
        let err = check_ack(&ack).unwrap_err();
        assert!(err.to_string().contains("invalid token"));
    }

    #[test]
    fn test_request_payload_shape() {
        let request = PushRequest {
            token: "tok",
            title: "hello",
            content: "<p>body</p>",
            topic: "topic",
            template: "html",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["token"], "tok");
        assert_eq!(value["title"], "hello");
        assert_eq!(value["content"], "<p>body</p>");
        assert_eq!(value["topic"], "topic");
        assert_eq!(value["template"], "html");
    }
}
