use serde::Deserialize;
use tracing::{error, warn};

use crate::api::ApiResponse;
use crate::error::GenerationError;
use crate::services::TopicQuestionGenerator;

/// 生成请求
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
}

/// 处理生成请求
///
/// 请求体必须是 `{ "topic": string }`。请求体无法解析或主题为空时返回 400，
/// 超时返回 504，其他内部错误返回 500。
pub async fn handle_generate(generator: &TopicQuestionGenerator, body: &str) -> ApiResponse {
    let request: GenerateRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("⚠️ 无法解析生成请求: {}", e);
            return ApiResponse::error(
                ApiResponse::BAD_REQUEST,
                GenerationError::InvalidInput.to_string(),
            );
        }
    };

    match generator.generate(&request.topic).await {
        Ok(batch) => ApiResponse::questions(batch),
        Err(e) => {
            let status = match e {
                GenerationError::InvalidInput => ApiResponse::BAD_REQUEST,
                GenerationError::Cancelled { .. } => ApiResponse::GATEWAY_TIMEOUT,
                GenerationError::GenerationFailure { .. } => ApiResponse::INTERNAL_SERVER_ERROR,
            };
            if status >= ApiResponse::INTERNAL_SERVER_ERROR {
                error!("❌ 生成题目失败: {}", e);
            }
            ApiResponse::error(status, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TopicLookup;
    use std::time::Duration;

    fn generator() -> TopicQuestionGenerator {
        TopicQuestionGenerator::with_lookup(TopicLookup::with_delay(Duration::ZERO))
    }

    #[tokio::test]
    async fn valid_topic_returns_questions() {
        let response = handle_generate(&generator(), r#"{"topic":"Onboarding"}"#).await;

        assert_eq!(response.status, ApiResponse::OK);
        let batch = response.into_batch().unwrap();
        assert!((4..=5).contains(&batch.len()));
    }

    #[tokio::test]
    async fn blank_topic_is_bad_request() {
        let response = handle_generate(&generator(), r#"{"topic":"   "}"#).await;
        assert_eq!(response.status, ApiResponse::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_or_non_string_topic_is_bad_request() {
        for body in [r#"{}"#, r#"{"topic": 42}"#, "not json"] {
            let response = handle_generate(&generator(), body).await;
            assert_eq!(response.status, ApiResponse::BAD_REQUEST, "{}", body);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_maps_to_gateway_timeout() {
        let generator = TopicQuestionGenerator::with_lookup(TopicLookup::with_delay(
            Duration::from_secs(5),
        ))
        .timeout(Duration::from_millis(10));

        let response = handle_generate(&generator, r#"{"topic":"Pricing"}"#).await;
        assert_eq!(response.status, ApiResponse::GATEWAY_TIMEOUT);
        assert!(response.into_batch().is_none());
    }
}
