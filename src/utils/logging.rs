//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志输出
///
/// `RUST_LOG` 优先；未设置时默认 `info`，`verbose` 为真时为 `debug`。
/// 重复调用不会报错（后续调用直接忽略）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目导入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `line`: 要写入的内容（自动补换行）
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `spreadsheets`: 待导入表格数量
/// - `topics`: 待生成主题数量
/// - `max_concurrent`: 最大并发数
pub fn log_startup(spreadsheets: usize, topics: usize, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目导入与生成");
    info!("📄 表格文件: {} 个", spreadsheets);
    info!("💡 生成主题: {} 个", topics);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录批次合并信息
///
/// # 参数
/// - `source`: 批次来源（文件路径或主题）
/// - `appended`: 本批追加数量
/// - `total`: 会话题目总数
pub fn log_batch_merged(source: &str, appended: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ [{}] 合并 {} 个题目, 会话共 {} 个", truncate_text(source, 40), appended, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功任务数量
/// - `failed`: 失败任务数量
/// - `questions`: 会话题目总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, questions: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, success + failed);
    info!("❌ 失败: {}", failed);
    info!("📚 题目总数: {}", questions);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
