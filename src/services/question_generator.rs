//! 主题题目生成服务 - 业务能力层
//!
//! 只负责"主题 → 题目批次"能力：模拟检索资料，然后从固定模板目录中
//! 随机抽取 4~5 个模板，用主题实例化。

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::GenerationError;
use crate::models::{Question, QuestionBatch};
use crate::services::templates::{render, QuestionTemplate, CATALOG, FRAMEWORKS};
use crate::services::topic_lookup::TopicLookup;

/// 每批最少题目数
pub const MIN_BATCH: usize = 4;
/// 每批最多题目数
pub const MAX_BATCH: usize = 5;

/// 主题题目生成服务
///
/// 职责：
/// - 校验主题
/// - 调用（模拟的）主题检索
/// - 随机抽取模板并实例化
/// - 不持有会话，不关心批次如何合并
#[derive(Debug, Clone)]
pub struct TopicQuestionGenerator {
    lookup: TopicLookup,
    timeout: Option<Duration>,
    catalog: &'static [QuestionTemplate],
}

impl TopicQuestionGenerator {
    /// 创建新的生成服务
    pub fn new(config: &Config) -> Self {
        Self {
            lookup: TopicLookup::new(config),
            timeout: (config.request_timeout_ms > 0)
                .then(|| Duration::from_millis(config.request_timeout_ms)),
            catalog: &CATALOG,
        }
    }

    /// 使用指定的检索服务创建，不设超时
    pub fn with_lookup(lookup: TopicLookup) -> Self {
        Self {
            lookup,
            timeout: None,
            catalog: &CATALOG,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 替换模板目录
    pub fn catalog(mut self, catalog: &'static [QuestionTemplate]) -> Self {
        self.catalog = catalog;
        self
    }

    /// 为主题生成一批题目
    ///
    /// # 返回
    /// - 主题为空或只有空白时返回 `InvalidInput`，不做任何检索
    /// - 检索超过超时时间时返回 `Cancelled`，不产生任何题目
    /// - 模板实例化失败时返回 `GenerationFailure`，不返回部分批次
    pub async fn generate(&self, topic: &str) -> Result<QuestionBatch, GenerationError> {
        validate_topic(topic)?;

        info!("🔍 正在为主题检索资料: {}", topic);
        let lookup = self.lookup.lookup(topic);
        let results = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lookup).await.map_err(|_| {
                GenerationError::Cancelled {
                    timeout_ms: limit.as_millis() as u64,
                }
            })?,
            None => lookup.await,
        };
        for result in &results {
            debug!("  检索结果: {}", result);
        }

        let timestamp_ms = Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        self.generate_with_rng(topic, &mut rng, timestamp_ms)
    }

    /// 使用给定的随机数源同步生成（不经过检索）
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        topic: &str,
        rng: &mut R,
        timestamp_ms: i64,
    ) -> Result<QuestionBatch, GenerationError> {
        validate_topic(topic)?;

        if self.catalog.len() < MIN_BATCH {
            return Err(GenerationError::failure(format!(
                "模板目录只有 {} 个模板，至少需要 {} 个",
                self.catalog.len(),
                MIN_BATCH
            )));
        }

        // 模板数为 4 时只能抽 4 个
        let count = rng.gen_range(MIN_BATCH..=MAX_BATCH.min(self.catalog.len()));

        // 部分 Fisher–Yates：只打乱需要的前 count 个位置
        let mut indices: Vec<usize> = (0..self.catalog.len()).collect();
        let (selected, _) = indices.partial_shuffle(rng, count);
        let selected = selected.to_vec();

        let mut questions = Vec::with_capacity(count);
        for (position, index) in selected.into_iter().enumerate() {
            let template = &self.catalog[index];
            let framework = FRAMEWORKS.choose(rng).copied().unwrap_or(FRAMEWORKS[0]);
            let values = [("topic", topic), ("framework", framework)];

            let question_text = render(template.question, &values)?;
            let answer_text = render(template.answer, &values)?;

            let question = Question::new(
                format!("generated-{}-{}", timestamp_ms, position),
                question_text,
                answer_text,
                topic,
                template.difficulty,
            )
            .ok_or_else(|| GenerationError::failure(format!("模板 {} 实例化后内容为空", index)))?;

            questions.push(question);
        }

        info!("✓ 为主题 \"{}\" 生成 {} 个题目", topic, questions.len());
        Ok(QuestionBatch::new(questions))
    }
}

fn validate_topic(topic: &str) -> Result<(), GenerationError> {
    if topic.trim().is_empty() {
        return Err(GenerationError::InvalidInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DifficultyLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> TopicQuestionGenerator {
        TopicQuestionGenerator::with_lookup(TopicLookup::with_delay(Duration::ZERO))
    }

    #[test]
    fn batch_size_is_four_or_five() {
        let generator = generator();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let batch = generator.generate_with_rng("Onboarding", &mut rng, 1).unwrap();
            assert!((MIN_BATCH..=MAX_BATCH).contains(&batch.len()));
        }
    }

    #[test]
    fn both_sizes_occur() {
        let generator = generator();
        let sizes: std::collections::HashSet<usize> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                generator.generate_with_rng("Growth", &mut rng, 1).unwrap().len()
            })
            .collect();
        assert_eq!(sizes.len(), 2);
    }

    #[test]
    fn templates_are_not_repeated_within_a_batch() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(7);
        let batch = generator.generate_with_rng("Pricing", &mut rng, 1).unwrap();

        let mut texts: Vec<&str> = batch.iter().map(Question::question).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), batch.len());
    }

    #[test]
    fn ids_combine_timestamp_and_position() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(3);
        let batch = generator.generate_with_rng("Pricing", &mut rng, 1700000000000).unwrap();

        for (position, q) in batch.iter().enumerate() {
            assert_eq!(q.id(), format!("generated-1700000000000-{}", position));
        }
    }

    #[test]
    fn topic_is_kept_verbatim() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(11);
        let batch = generator.generate_with_rng("  Search ", &mut rng, 1).unwrap();

        assert!(batch.iter().all(|q| q.topic() == "  Search "));
        assert!(batch.iter().all(|q| q.question().contains("  Search ")));
    }

    #[test]
    fn generated_difficulty_matches_template() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(5);
        let batch = generator.generate_with_rng("Onboarding", &mut rng, 1).unwrap();

        for q in &batch {
            let template = CATALOG
                .iter()
                .find(|t| t.matches_question("Onboarding", q.question()))
                .expect("question should come from the catalog");
            assert_eq!(q.difficulty_level(), template.difficulty);
            assert!(DifficultyLevel::ALL.contains(&q.difficulty_level()));
        }
    }

    #[test]
    fn whitespace_topic_is_invalid_input() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generator.generate_with_rng(" \t ", &mut rng, 1).unwrap_err(),
            GenerationError::InvalidInput
        );
    }

    static BROKEN_CATALOG: [QuestionTemplate; 5] = [
        QuestionTemplate {
            question: "Q {topic}",
            answer: "A {topic}",
            difficulty: DifficultyLevel::Easy,
        },
        QuestionTemplate {
            question: "Q {topic}",
            answer: "A {topic}",
            difficulty: DifficultyLevel::Easy,
        },
        QuestionTemplate {
            question: "Q {topic}",
            answer: "A {topic}",
            difficulty: DifficultyLevel::Easy,
        },
        QuestionTemplate {
            question: "Q {topic}",
            answer: "A {topic}",
            difficulty: DifficultyLevel::Easy,
        },
        QuestionTemplate {
            question: "Q {topic} for {persona}",
            answer: "A {topic}",
            difficulty: DifficultyLevel::Easy,
        },
    ];

    #[test]
    fn broken_template_fails_whole_batch() {
        let generator = generator().catalog(&BROKEN_CATALOG);

        // 每批至少抽 4 个模板，总有种子会抽到坏模板
        let failed = (0..32).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            matches!(
                generator.generate_with_rng("Pricing", &mut rng, 1),
                Err(GenerationError::GenerationFailure { .. })
            )
        });
        assert!(failed);
    }

    static SHORT_CATALOG: [QuestionTemplate; 2] = [CATALOG[1], CATALOG[2]];

    #[test]
    fn short_catalog_is_generation_failure() {
        let generator = generator().catalog(&SHORT_CATALOG);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate_with_rng("Pricing", &mut rng, 1).unwrap_err();
        assert!(matches!(err, GenerationError::GenerationFailure { .. }));
    }

    #[test]
    fn empty_catalog_is_generation_failure() {
        let generator = generator().catalog(&[]);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            generator.generate_with_rng("Pricing", &mut rng, 1),
            Err(GenerationError::GenerationFailure { .. })
        ));
    }

    #[tokio::test]
    async fn async_generate_rejects_empty_topic_before_lookup() {
        let generator = TopicQuestionGenerator::with_lookup(TopicLookup::with_delay(
            Duration::from_secs(3600),
        ))
        .timeout(Duration::from_millis(1));

        let err = generator.generate("").await.unwrap_err();
        assert_eq!(err, GenerationError::InvalidInput);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_lookup_is_cancelled_by_timeout() {
        let generator = TopicQuestionGenerator::with_lookup(TopicLookup::with_delay(
            Duration::from_secs(10),
        ))
        .timeout(Duration::from_millis(500));

        let err = generator.generate("Pricing").await.unwrap_err();
        assert_eq!(err, GenerationError::Cancelled { timeout_ms: 500 });
    }
}
