//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理所有表格和主题)
//!     ↓
//! services (能力层：导入 / 生成 / 检索)
//!     ↓
//! workflow::QuizSession (合并批次，持有会话状态)
//! ```
//!
//! 只有编排层同时持有服务和会话；服务之间互不依赖。

pub mod app;

pub use app::{App, RunStats};
