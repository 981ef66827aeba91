//! # Quiz Bank
//!
//! 测验题目的导入与生成：从表格导入问答题，或按主题生成模板题目，
//! 合并到同一个测验会话中浏览和自测。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、难度、批次、表格原始行
//! - `models/loaders` - 表格字节流解码（第一个工作表 → 原始行）
//!
//! ### ② 业务能力层（Services）
//! - `SpreadsheetImporter` - 原始行 → 题目批次（校验、过滤、编号）
//! - `TopicQuestionGenerator` - 主题 → 随机模板题目批次
//! - `TopicLookup` - 模拟的主题检索（可取消的延迟）
//!
//! ### ③ 流程层（Workflow）
//! - `QuizSession` - 累积题目列表，选中题目、显示答案、进度
//! - `QuestionFilter` - 按关键字和难度筛选
//!
//! ### ④ 接口层与编排层
//! - `api/` - 请求 → 状态码 + JSON
//! - `orchestrator/` - 批量导入与生成，合并到会话并输出统计
//!
//! ## 错误
//!
//! 导入：`ParseFailure` / `EmptyResult`；生成：`InvalidInput` / `GenerationFailure` / `Cancelled`。
//! 所有错误都是整批失败，不会向会话写入部分结果。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, GenerationError, ImportError};
pub use models::{DifficultyLevel, Question, QuestionBatch};
pub use orchestrator::{App, RunStats};
pub use services::{SpreadsheetImporter, TopicQuestionGenerator};
pub use workflow::{QuestionFilter, QuizSession};
