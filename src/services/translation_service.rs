use reqwest::blocking::Client;
use serde_json::Value;
use tracing::warn;

use crate::errors::{WatchError, WatchResult};

/// Translator inputs are cut to this many characters before leaving the
/// process; the services reject longer queries.
const DEFAULT_MAX_INPUT_CHARS: usize = 500;

/// Best-effort translation; failure degrades to passthrough, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// One concrete translation service. Errors here stay inside the facade.
#[cfg_attr(test, mockall::automock)]
pub trait TranslateBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn translate(&self, text: &str) -> WatchResult<String>;
}

/// Primary-then-fallback translation. Each backend is tried at most once per
/// request; when both fail the original text is returned unchanged.
pub struct TranslationService<P: TranslateBackend, F: TranslateBackend> {
    primary: P,
    fallback: F,
    max_input_chars: usize,
}

impl<P: TranslateBackend, F: TranslateBackend> TranslationService<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }
}

impl<P: TranslateBackend, F: TranslateBackend> Translator for TranslationService<P, F> {
    fn translate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let truncated = truncate_to_char_boundary(text, self.max_input_chars);

        match self.primary.translate(&truncated) {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    backend = self.primary.name(),
                    error = %e,
                    "primary translation failed, trying fallback"
                );
                match self.fallback.translate(&truncated) {
                    Ok(translated) => translated,
                    Err(e) => {
                        warn!(
                            backend = self.fallback.name(),
                            error = %e,
                            "fallback translation failed, passing text through"
                        );
                        text.to_string()
                    }
                }
            }
        }
    }
}

/// MyMemory-style service: GET with `q` and `langpair`, JSON envelope with a
/// status field and the translation nested under `responseData`.
pub struct MyMemoryBackend {
    client: Client,
    api_url: String,
    target_lang: String,
}

impl MyMemoryBackend {
    pub fn new(api_url: String, target_lang: String) -> Self {
        Self {
            client: translation_client(),
            api_url,
            target_lang,
        }
    }
}

impl TranslateBackend for MyMemoryBackend {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    fn translate(&self, text: &str) -> WatchResult<String> {
        let langpair = format!("en|{}", self.target_lang);
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Translation(format!(
                "mymemory returned status {status}"
            )));
        }

        let value: Value = response.json()?;
        parse_mymemory_response(&value)
            .ok_or_else(|| WatchError::Translation("unexpected mymemory response shape".to_string()))
    }
}

/// Google-style service: GET on the `gtx` endpoint, response is a nested
/// array whose first element lists translated segments.
pub struct GoogleTranslateBackend {
    client: Client,
    api_url: String,
    target_lang: String,
}

impl GoogleTranslateBackend {
    pub fn new(api_url: String, target_lang: String) -> Self {
        Self {
            client: translation_client(),
            api_url,
            target_lang,
        }
    }
}

impl TranslateBackend for GoogleTranslateBackend {
    fn name(&self) -> &'static str {
        "google"
    }

    fn translate(&self, text: &str) -> WatchResult<String> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Translation(format!(
                "google returned status {status}"
            )));
        }

        let value: Value = response.json()?;
        parse_google_response(&value)
            .ok_or_else(|| WatchError::Translation("unexpected google response shape".to_string()))
    }
}

// The public translation endpoints answer plain API clients with a captcha
// page; a browser user agent keeps them talking JSON.
fn translation_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .user_agent("Mozilla/5.0")
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn parse_mymemory_response(value: &Value) -> Option<String> {
    if value.get("responseStatus")?.as_i64()? != 200 {
        return None;
    }
    let translated = value
        .get("responseData")?
        .get("translatedText")?
        .as_str()?
        .trim();
    (!translated.is_empty()).then(|| translated.to_string())
}

fn parse_google_response(value: &Value) -> Option<String> {
    let segments = value.get(0)?.as_array()?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    (!translated.is_empty()).then_some(translated)
}

/// Truncate string to at most `max_chars` characters, respecting char boundaries
fn truncate_to_char_boundary(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
