use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Instant;
use tracing::info;

use super::ProviderId;
use super::prompt::style_prompt;
use crate::config::{DeeplxConfig, OpenAiConfig};
use crate::error::{Error, Result};

/// The two translation backends, one `(text, source, target)` triple per call.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate_default(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String>;

    /// Only valid for allow-listed target languages; anything else is a
    /// [`Error::Configuration`].
    async fn translate_augmented(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct DeeplxRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct DeeplxResponse {
    code: i64,
    data: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for both backends.
#[derive(Debug, Clone)]
pub struct ProviderGateway {
    client: Client,
    deeplx_url: String,
    openai_url: String,
    openai_model: String,
    openai_api_key: String,
}

impl ProviderGateway {
    pub fn new(deeplx: &DeeplxConfig, openai: &OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            deeplx_url: deeplx.url.clone(),
            openai_url: openai.url.clone(),
            openai_model: openai.model.clone(),
            openai_api_key: openai.get_api_key(),
        }
    }
}

#[async_trait]
impl TranslationBackend for ProviderGateway {
    async fn translate_default(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        let provider = ProviderId::Default;
        let request = DeeplxRequest {
            text,
            source_lang,
            target_lang,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(&self.deeplx_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    provider,
                    format!("failed to connect to {}: {e}", self.deeplx_url),
                )
            })?;
        info!(
            %provider,
            source_lang,
            target_lang,
            elapsed_ms = start.elapsed().as_millis(),
            "Translation request finished"
        );

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::provider(provider, format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            return Err(Error::provider_with_response(
                provider,
                format!("request failed with status {status}"),
                body,
            ));
        }

        let parsed: DeeplxResponse = serde_json::from_str(&body).map_err(|e| {
            Error::provider_with_response(provider, format!("malformed response: {e}"), &body)
        })?;

        match parsed {
            DeeplxResponse {
                code: 200,
                data: Some(data),
            } => Ok(data),
            DeeplxResponse { code, .. } => Err(Error::provider_with_response(
                provider,
                format!("backend returned code {code}"),
                body,
            )),
        }
    }

    async fn translate_augmented(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        let provider = ProviderId::Augmented;
        let system_prompt = style_prompt(target_lang).ok_or_else(|| {
            Error::configuration(format!(
                "augmented provider does not support target language '{target_lang}'"
            ))
        })?;

        let chat_request = ChatCompletionRequest {
            model: &self.openai_model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Borrowed(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(text),
                },
            ],
            stream: false,
            temperature: 0.5,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            top_p: 1.0,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(&self.openai_url)
            .header("Authorization", format!("Bearer {}", self.openai_api_key))
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    provider,
                    format!("failed to connect to {}: {e}", self.openai_url),
                )
            })?;
        info!(
            %provider,
            source_lang,
            target_lang,
            elapsed_ms = start.elapsed().as_millis(),
            "Translation request finished"
        );

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::provider(provider, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Error::provider_with_response(
                provider,
                format!("request failed with status {status}"),
                body,
            ));
        }

        let content = serde_json::from_str::<ChatCompletionResponse>(&body)
            .ok()
            .and_then(|r| r.choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty());

        content.ok_or_else(|| {
            Error::provider_with_response(provider, "response has no completion content", body)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn create_gateway(server: &MockServer) -> ProviderGateway {
        ProviderGateway::new(
            &DeeplxConfig {
                url: server.url("/translate"),
            },
            &OpenAiConfig {
                enable: true,
                api_key: "sk-test".to_string(),
                url: server.url("/v1/chat/completions"),
                model: "gpt-test".to_string(),
                ..OpenAiConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_default_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/translate").json_body(json!({
                    "text": "你好",
                    "source_lang": "zh",
                    "target_lang": "en"
                }));
                then.status(200)
                    .json_body(json!({"code": 200, "data": "Hello"}));
            })
            .await;

        let gateway = create_gateway(&server);
        let translated = gateway.translate_default("你好", "zh", "en").await.unwrap();

        assert_eq!(translated, "Hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_default_http_error_keeps_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/translate");
                then.status(503).body("service unavailable");
            })
            .await;

        let gateway = create_gateway(&server);
        let err = gateway.translate_default("hi", "en", "fr").await.unwrap_err();

        match err {
            Error::Provider {
                provider, response, ..
            } => {
                assert_eq!(provider, ProviderId::Default);
                assert_eq!(response.as_deref(), Some("service unavailable"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_default_backend_failure_code() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/translate");
                then.status(200)
                    .json_body(json!({"code": 429, "message": "too many requests"}));
            })
            .await;

        let gateway = create_gateway(&server);
        let err = gateway.translate_default("hi", "en", "fr").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Provider { ref message, response: Some(ref body), .. }
                if message.contains("429") && body.contains("too many requests")
        ));
    }

    #[tokio::test]
    async fn test_default_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/translate");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let gateway = create_gateway(&server);
        let err = gateway.translate_default("hi", "en", "fr").await.unwrap_err();

        assert!(matches!(err, Error::Provider { .. }));
    }

    #[tokio::test]
    async fn test_augmented_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body_partial(r#"{"model": "gpt-test", "stream": false}"#);
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "How's it going?\n"}}]
                }));
            })
            .await;

        let gateway = create_gateway(&server);
        let translated = gateway
            .translate_augmented("最近怎么样", "zh", "en")
            .await
            .unwrap();

        assert_eq!(translated, "How's it going?");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_augmented_missing_choices() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let gateway = create_gateway(&server);
        let err = gateway
            .translate_augmented("你好", "zh", "en")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Provider { provider: ProviderId::Augmented, response: Some(_), .. }
        ));
    }

    #[tokio::test]
    async fn test_augmented_unsupported_language_is_configuration_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let gateway = create_gateway(&server);
        let err = gateway
            .translate_augmented("hello", "en", "fr")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
        mock.assert_hits_async(0).await;
    }
}
