//! 表格导入服务 - 业务能力层
//!
//! 只负责"字节流 → 题目批次"能力，不关心批次如何合并到会话

use crate::error::ImportError;
use crate::models::{
    decode_workbook, decode_workbook_owned, Column, DifficultyLevel, Question, QuestionBatch,
    RawRow,
};
use tracing::{debug, info, warn};

/// 表格导入服务
///
/// 职责：
/// - 解码表格的第一个工作表
/// - 把可识别的列映射为题目字段
/// - 丢弃题干或答案为空的行
/// - 分配批次内唯一的 ID（`excel-<行号>`）
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetImporter;

impl SpreadsheetImporter {
    pub fn new() -> Self {
        Self
    }

    /// 导入表格字节流（同步，CPU 密集）
    ///
    /// # 返回
    /// - 成功时返回按原始行顺序排列的题目批次
    /// - 无法解码时返回 `ParseFailure`
    /// - 没有任何有效行时返回 `EmptyResult`
    pub fn import(&self, bytes: &[u8]) -> Result<QuestionBatch, ImportError> {
        debug!("开始解码表格, 大小: {} 字节", bytes.len());
        let rows = decode_workbook(bytes)?;
        self.import_rows(rows)
    }

    /// 导入已拥有的字节缓冲区，解码时不再复制
    pub fn import_owned(&self, bytes: Vec<u8>) -> Result<QuestionBatch, ImportError> {
        debug!("开始解码表格, 大小: {} 字节", bytes.len());
        let rows = decode_workbook_owned(bytes)?;
        self.import_rows(rows)
    }

    /// 在阻塞线程池中导入，避免占用异步运行时
    pub async fn import_async(&self, bytes: Vec<u8>) -> Result<QuestionBatch, ImportError> {
        let importer = *self;
        tokio::task::spawn_blocking(move || importer.import_owned(bytes))
            .await
            .map_err(|e| ImportError::parse_failure(format!("导入任务异常终止: {}", e)))?
    }

    /// 将原始行映射为题目批次
    pub fn import_rows(&self, rows: Vec<RawRow>) -> Result<QuestionBatch, ImportError> {
        let rows_seen = rows.len();

        let batch: QuestionBatch = rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| row_to_question(index + 1, row))
            .collect();

        if batch.is_empty() {
            warn!("⚠️ 表格共 {} 行数据，但没有有效题目", rows_seen);
            return Err(ImportError::EmptyResult { rows_seen });
        }

        let dropped = rows_seen - batch.len();
        if dropped > 0 {
            info!("已丢弃 {} 行缺少题干或答案的数据", dropped);
        }
        info!("✓ 从表格导入 {} 个题目", batch.len());

        Ok(batch)
    }
}

/// 由一行原始数据构造候选题目，题干或答案为空时返回 `None`
fn row_to_question(position: usize, row: &RawRow) -> Option<Question> {
    let question = Question::new(
        format!("excel-{}", position),
        row.text(Column::Question).trim(),
        row.text(Column::Answer).trim(),
        row.text(Column::Topic).trim(),
        DifficultyLevel::from_label_or_default(row.text(Column::DifficultyLevel).trim()),
    );

    if question.is_none() {
        debug!("第 {} 行缺少题干或答案，已跳过", position);
    }
    question
}
