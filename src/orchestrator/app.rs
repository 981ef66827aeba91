//! 批量导入与生成 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写日志文件头、创建导入和生成服务
//! 2. **批量导入**：并发读取并解码所有配置的表格文件
//! 3. **批量生成**：并发为所有配置的主题生成题目
//! 4. **合并批次**：按配置顺序把成功的批次追加到同一个会话
//! 5. **全局统计**：汇总成功和失败的任务
//!
//! 单个任务失败只记录日志，不影响其他任务，也不会向会话写入任何内容。

use crate::config::Config;
use crate::models::{read_spreadsheet_file, QuestionBatch};
use crate::services::{SpreadsheetImporter, TopicQuestionGenerator};
use crate::utils::logging::{
    append_log_line, init_log_file, log_batch_merged, log_startup, print_final_stats,
};
use crate::workflow::QuizSession;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    importer: SpreadsheetImporter,
    generator: TopicQuestionGenerator,
    session: QuizSession,
}

/// 单个任务的结果，失败时携带写入日志文件的原因
type JobOutcome = std::result::Result<QuestionBatch, String>;

/// 运行统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub success: usize,
    pub failed: usize,
    pub questions: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        log_startup(
            config.spreadsheet_paths.len(),
            config.topics.len(),
            config.max_concurrent_jobs,
        );

        Ok(Self {
            importer: SpreadsheetImporter::new(),
            generator: TopicQuestionGenerator::new(&config),
            session: QuizSession::new(),
            config,
        })
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn into_session(self) -> QuizSession {
        self.session
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<RunStats> {
        if self.config.spreadsheet_paths.is_empty() && self.config.topics.is_empty() {
            warn!("⚠️ 没有配置表格文件或主题，程序结束");
            return Ok(RunStats::default());
        }

        let mut stats = RunStats::default();

        let imported = self.import_all().await?;
        self.merge(imported, &mut stats);

        let generated = self.generate_all().await;
        self.merge(generated, &mut stats);

        stats.questions = self.session.len();
        self.write_log_line(&format!(
            "\n成功: {}/{} | 失败: {} | 题目总数: {}",
            stats.success,
            stats.success + stats.failed,
            stats.failed,
            stats.questions
        ));
        print_final_stats(
            stats.success,
            stats.failed,
            stats.questions,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 并发导入所有表格，结果按配置顺序返回
    async fn import_all(&self) -> Result<Vec<(String, JobOutcome)>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_jobs.max(1)));
        let mut handles = Vec::new();

        for path in &self.config.spreadsheet_paths {
            let permit = semaphore.clone().acquire_owned().await?;
            let importer = self.importer;
            let path_buf = PathBuf::from(path);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let bytes = read_spreadsheet_file(&path_buf).await?;
                let batch = importer.import_async(bytes).await?;
                anyhow::Ok(batch)
            });
            handles.push((path.clone(), handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (path, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(batch)) => Ok(batch),
                Ok(Err(e)) => {
                    error!("[{}] ❌ 导入失败: {:#}", path, e);
                    Err(format!("导入失败: {:#}", e))
                }
                Err(e) => {
                    error!("[{}] 任务执行失败: {}", path, e);
                    Err(format!("任务执行失败: {}", e))
                }
            };
            results.push((path, outcome));
        }

        Ok(results)
    }

    /// 并发为所有主题生成题目，结果按配置顺序返回
    async fn generate_all(&self) -> Vec<(String, JobOutcome)> {
        let generator = &self.generator;

        stream::iter(self.config.topics.iter().cloned())
            .map(|topic| async move {
                info!("[{}] 💡 开始生成题目", topic);
                match generator.generate(&topic).await {
                    Ok(batch) => (topic, Ok(batch)),
                    Err(e) => {
                        error!("[{}] ❌ 生成失败: {}", topic, e);
                        (topic, Err(format!("生成失败: {}", e)))
                    }
                }
            })
            .buffered(self.config.max_concurrent_jobs.max(1))
            .collect::<Vec<_>>()
            .await
    }

    /// 按顺序合并批次，并把每个任务的结果写入日志文件
    fn merge(&mut self, results: Vec<(String, JobOutcome)>, stats: &mut RunStats) {
        for (source, outcome) in results {
            match outcome {
                Ok(batch) => {
                    let appended = self.session.append_batch(batch);
                    log_batch_merged(&source, appended, self.session.len());
                    self.write_log_line(&format!("✓ [{}] 合并 {} 个题目", source, appended));
                    stats.success += 1;
                }
                Err(reason) => {
                    self.write_log_line(&format!("❌ [{}] {}", source, reason));
                    stats.failed += 1;
                }
            }
        }
    }

    /// 写日志文件失败只告警，不影响本次运行
    fn write_log_line(&self, line: &str) {
        if let Err(e) = append_log_line(&self.config.output_log_file, line) {
            warn!("⚠️ 写入日志文件失败 ({}): {}", self.config.output_log_file, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_file: &std::path::Path) -> Config {
        Config {
            lookup_delay_ms: 0,
            request_timeout_ms: 0,
            output_log_file: log_file.display().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn topics_are_generated_and_failures_counted() {
        let log_file = std::env::temp_dir().join("quiz_bank_app_topics.log");
        let mut config = config(&log_file);
        config.topics = vec!["Onboarding".to_string(), "   ".to_string(), "Pricing".to_string()];

        let mut app = App::initialize(config).await.unwrap();
        let stats = app.run().await.unwrap();

        assert_eq!(stats.success, 2);
        assert_eq!(stats.failed, 1);
        assert!((8..=10).contains(&stats.questions));

        let first = app.session().entries()[0].question.topic().to_string();
        assert_eq!(first, "Onboarding");
    }

    #[tokio::test]
    async fn missing_spreadsheet_is_a_failed_job() {
        let log_file = std::env::temp_dir().join("quiz_bank_app_missing.log");
        let mut config = config(&log_file);
        config.spreadsheet_paths = vec!["/definitely/not/here.xlsx".to_string()];

        let mut app = App::initialize(config).await.unwrap();
        let stats = app.run().await.unwrap();

        assert_eq!(stats, RunStats { success: 0, failed: 1, questions: 0 });
        assert!(app.session().is_empty());
    }

    #[tokio::test]
    async fn job_outcomes_are_written_to_the_log_file() {
        let log_file = std::env::temp_dir().join("quiz_bank_app_outcomes.log");
        let mut config = config(&log_file);
        config.spreadsheet_paths = vec!["/definitely/not/here.xlsx".to_string()];
        config.topics = vec!["Onboarding".to_string()];

        let mut app = App::initialize(config).await.unwrap();
        let stats = app.run().await.unwrap();

        let content = std::fs::read_to_string(&log_file).unwrap();
        assert!(content.contains("❌ [/definitely/not/here.xlsx] 导入失败"));
        assert!(content.contains(&format!(
            "✓ [Onboarding] 合并 {} 个题目",
            stats.questions
        )));
        assert!(content.contains("成功: 1/2 | 失败: 1"));
    }
}
