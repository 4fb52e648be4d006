#[cfg(test)]
mod tests {
    use crate::ai::{AIClient, AIError, RetryConfig, TextGenerator};
    use crate::config::{AIConfig, AIProvider};
    use serde_json::json;

    fn anthropic_config(api_url: String) -> AIConfig {
        AIConfig {
            provider: AIProvider::Anthropic,
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 1000,
            anthropic_api_key: Some("test_key".to_string()),
            openai_api_key: None,
            api_url: Some(api_url),
        }
    }

    #[tokio::test]
    async fn anthropic_response_text_is_returned() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "content": [
                        {"type": "text", "text": "# Project Overview\n\nA small tool."}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = anthropic_config(format!("{}/v1/messages", server.url()));
        let client = AIClient::new(config);

        let text = client.generate("describe this project").await.unwrap();
        assert_eq!(text, "# Project Overview\n\nA small tool.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn openai_choice_content_is_returned() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "Component analysis."}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = AIConfig {
            provider: AIProvider::OpenAI,
            model: "gpt-4".to_string(),
            max_tokens: 1000,
            anthropic_api_key: None,
            openai_api_key: Some("test_key".to_string()),
            api_url: Some(format!("{}/v1/chat/completions", server.url())),
        };
        let client = AIClient::new(config);

        let text = client.generate("describe this project").await.unwrap();
        assert_eq!(text, "Component analysis.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_error_without_retry() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;

        let config = anthropic_config(format!("{}/v1/messages", server.url()));
        let client = AIClient::new(config).with_retry(RetryConfig::fast(3));

        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(AIError::Authentication(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limit_is_retried_then_surfaced() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(429)
            .expect(2)
            .create_async()
            .await;

        let config = anthropic_config(format!("{}/v1/messages", server.url()));
        let client = AIClient::new(config).with_retry(RetryConfig::fast(2));

        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(AIError::RateLimit(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_api_key_fails_validation_before_any_request() {
        let config = AIConfig {
            provider: AIProvider::Anthropic,
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 1000,
            anthropic_api_key: None,
            openai_api_key: None,
            api_url: None,
        };
        let client = AIClient::new(config);

        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(AIError::Validation(_))));
    }
}
