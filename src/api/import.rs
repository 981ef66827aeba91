use tracing::warn;

use crate::api::ApiResponse;
use crate::error::ImportError;
use crate::services::SpreadsheetImporter;

/// 处理表格导入请求
///
/// 无法解码返回 400，没有有效题目返回 422。
pub async fn handle_import(importer: &SpreadsheetImporter, bytes: Vec<u8>) -> ApiResponse {
    match importer.import_async(bytes).await {
        Ok(batch) => ApiResponse::questions(batch),
        Err(e) => {
            warn!("⚠️ 导入表格失败: {}", e);
            let status = match e {
                ImportError::ParseFailure { .. } => ApiResponse::BAD_REQUEST,
                ImportError::EmptyResult { .. } => ApiResponse::UNPROCESSABLE_ENTITY,
            };
            ApiResponse::error(status, e.to_string())
        }
    }
}
