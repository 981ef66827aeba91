//! 接口层
//!
//! 把导入和生成能力包装成"请求 → 状态码 + JSON"的形式，
//! 既可以挂到网络接口上，也可以直接作为本地函数调用。

pub mod generate;
pub mod import;

use serde::Serialize;

use crate::models::QuestionBatch;

pub use generate::{handle_generate, GenerateRequest};
pub use import::handle_import;

/// 响应体
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ApiBody {
    Questions { questions: QuestionBatch },
    Error { error: String },
}

/// 接口响应
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ApiBody,
}

impl ApiResponse {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const GATEWAY_TIMEOUT: u16 = 504;

    pub fn questions(batch: QuestionBatch) -> Self {
        Self {
            status: Self::OK,
            body: ApiBody::Questions { questions: batch },
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiBody::Error {
                error: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 成功时取出题目批次
    pub fn into_batch(self) -> Option<QuestionBatch> {
        match self.body {
            ApiBody::Questions { questions } => Some(questions),
            ApiBody::Error { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_serializes_as_error_object() {
        let response = ApiResponse::error(ApiResponse::BAD_REQUEST, "topic required");
        let value: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

        assert_eq!(value, json!({ "error": "topic required" }));
        assert!(!response.is_success());
    }

    #[test]
    fn questions_body_wraps_batch() {
        let response = ApiResponse::questions(QuestionBatch::default());
        let value: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

        assert_eq!(value, json!({ "questions": [] }));
        assert!(response.is_success());
    }
}
