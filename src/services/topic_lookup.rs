//! 主题检索服务（模拟）
//!
//! 代表"为主题检索外部资料"这一步。目前只是一个可取消的延迟，
//! 返回固定的资料摘要，这些内容不会进入生成的题目。

use crate::config::Config;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// 检索结果条目
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult {
    pub title: String,
    pub content: String,
    pub source: &'static str,
}

impl std::fmt::Display for LookupResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.title, self.source)
    }
}

/// 主题检索服务
#[derive(Debug, Clone)]
pub struct TopicLookup {
    delay: Duration,
}

impl TopicLookup {
    pub fn new(config: &Config) -> Self {
        Self::with_delay(Duration::from_millis(config.lookup_delay_ms))
    }

    /// 使用自定义延迟创建，`Duration::ZERO` 表示不等待
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 构造检索语句
    pub fn search_query(topic: &str) -> String {
        format!(
            "{} product management interview questions answers site:medium.com OR site:productmanagementexercises.com OR site:glassdoor.com",
            topic
        )
    }

    /// 检索主题资料
    ///
    /// 丢弃返回的 future 即可取消检索。
    pub async fn lookup(&self, topic: &str) -> Vec<LookupResult> {
        debug!("🔍 检索语句: {}", Self::search_query(topic));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        vec![
            LookupResult {
                title: format!("{} Product Management Best Practices", topic),
                content: format!(
                    "Key strategies for {} include user-centered design, data-driven decisions, stakeholder alignment, and iterative development approaches.",
                    topic
                ),
                source: "medium.com",
            },
            LookupResult {
                title: format!("How to Excel at {} as a Product Manager", topic),
                content: format!(
                    "Success in {} requires understanding user needs, market dynamics, technical constraints, and business objectives while maintaining clear communication.",
                    topic
                ),
                source: "productmanagementexercises.com",
            },
            LookupResult {
                title: format!("{} Interview Questions for Product Managers", topic),
                content: "Common questions include prioritization frameworks, metrics definition, user research methods, and stakeholder management strategies.".to_string(),
                source: "glassdoor.com",
            },
        ]
    }
}
