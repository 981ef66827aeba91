//! 题目模板目录
//!
//! 模板中的 `{topic}` 会被替换为主题，`{framework}` 会被替换为随机抽取的优先级框架名称。

use crate::error::GenerationError;
use crate::models::DifficultyLevel;
use regex::Regex;
use std::sync::OnceLock;

/// 可供抽取的优先级框架
pub const FRAMEWORKS: [&str; 6] = [
    "RICE",
    "MoSCoW",
    "Kano Model",
    "Jobs-to-be-Done",
    "OKRs",
    "North Star Framework",
];

/// 题目模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTemplate {
    pub question: &'static str,
    pub answer: &'static str,
    pub difficulty: DifficultyLevel,
}

/// 固定模板目录
pub const CATALOG: [QuestionTemplate; 5] = [
    QuestionTemplate {
        question: "How would you apply the {framework} framework to prioritize {topic} initiatives?",
        answer: "When applying prioritization frameworks to {topic}, start by defining clear criteria relevant to your business context. For RICE, evaluate Reach (how many users affected), Impact (business value), Confidence (certainty in estimates), and Effort (resources required). Score each {topic} initiative and prioritize high-scoring items that align with strategic goals.",
        difficulty: DifficultyLevel::Medium,
    },
    QuestionTemplate {
        question: "What key metrics would you track to measure success in {topic}?",
        answer: "For {topic}, establish a hierarchy of metrics: North Star Metric (primary success indicator), Key Performance Indicators (business outcomes), and Leading Indicators (early signals). Include user engagement metrics, business impact measures, and operational efficiency indicators specific to {topic} domain.",
        difficulty: DifficultyLevel::Hard,
    },
    QuestionTemplate {
        question: "How would you conduct user research to validate {topic} assumptions?",
        answer: "Use a mixed-methods approach: qualitative research (user interviews, usability testing) to understand the 'why' behind user behavior, and quantitative research (surveys, analytics) to measure the 'what' and 'how much'. For {topic}, focus on understanding user pain points, validating problem-solution fit, and testing key hypotheses.",
        difficulty: DifficultyLevel::Easy,
    },
    QuestionTemplate {
        question: "Describe your approach to stakeholder alignment for a {topic} product initiative.",
        answer: "Establish clear communication frameworks with regular touchpoints, shared documentation, and transparent decision-making processes. For {topic} initiatives, create alignment through shared vision, defined success metrics, clear roles and responsibilities, and regular progress updates to all stakeholders.",
        difficulty: DifficultyLevel::Medium,
    },
    QuestionTemplate {
        question: "How would you handle competing priorities in {topic} product development?",
        answer: "Use a structured approach for {topic}: 1) Clarify business objectives and user needs, 2) Apply prioritization frameworks considering impact and effort, 3) Communicate trade-offs transparently, 4) Involve stakeholders in decision-making, 5) Document decisions and rationale for future reference.",
        difficulty: DifficultyLevel::Hard,
    },
];

impl QuestionTemplate {
    /// 判断一段题干是否由本模板针对该主题生成
    pub fn matches_question(&self, topic: &str, text: &str) -> bool {
        FRAMEWORKS.iter().any(|framework| {
            render(self.question, &[("topic", topic), ("framework", *framework)])
                .map(|rendered| rendered == text)
                .unwrap_or(false)
        })
    }
}

fn placeholder_regex() -> Result<&'static Regex, GenerationError> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = PLACEHOLDER.get() {
        return Ok(re);
    }
    let re = Regex::new(r"\{([A-Za-z_]+)\}")
        .map_err(|e| GenerationError::failure(format!("占位符正则编译失败: {}", e)))?;
    Ok(PLACEHOLDER.get_or_init(|| re))
}

/// 替换模板中的所有占位符
///
/// 替换值原样插入，不会被再次扫描，所以主题里出现花括号也不会被当作占位符。
/// 模板中出现未提供的占位符时返回 `GenerationFailure`。
pub fn render(pattern: &str, values: &[(&str, &str)]) -> Result<String, GenerationError> {
    let re = placeholder_regex()?;
    let mut output = String::with_capacity(pattern.len());
    let mut last = 0;

    for caps in re.captures_iter(pattern) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = values
            .iter()
            .find(|(key, _)| *key == name.as_str())
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                GenerationError::failure(format!("模板包含未知占位符 {{{}}}", name.as_str()))
            })?;

        output.push_str(&pattern[last..whole.start()]);
        output.push_str(value);
        last = whole.end();
    }
    output.push_str(&pattern[last..]);

    Ok(output)
}
