use serde::{Deserialize, Serialize};

use crate::models::difficulty::DifficultyLevel;

/// 题目
///
/// 创建后不可变。只能通过 [`Question::new`] 构造，题干和答案都必须非空，
/// 不合法的数据在进入会话之前就会被丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestionRecord")]
pub struct Question {
    id: String,
    question: String,
    answer: String,
    topic: String,
    difficulty_level: DifficultyLevel,
}

impl Question {
    /// 创建题目，题干或答案去除空白后为空时返回 `None`
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        topic: impl Into<String>,
        difficulty_level: DifficultyLevel,
    ) -> Option<Self> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() || answer.trim().is_empty() {
            return None;
        }

        Some(Self {
            id: id.into(),
            question,
            answer,
            topic: topic.into(),
            difficulty_level,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty_level
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干以便显示（最多80个字符）
        let preview = if self.question.chars().count() > 80 {
            self.question.chars().take(80).collect::<String>() + "..."
        } else {
            self.question.clone()
        };

        write!(f, "[{}] {} ({})", self.id, preview, self.difficulty_level)
    }
}

/// 反序列化用的中间结构，经过 [`Question::new`] 校验后才成为 `Question`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: String,
    question: String,
    answer: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    difficulty_level: DifficultyLevel,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = String;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let id = record.id.clone();
        Question::new(
            record.id,
            record.question,
            record.answer,
            record.topic,
            record.difficulty_level,
        )
        .ok_or_else(|| format!("题目 {} 的题干或答案为空", id))
    }
}

/// 一次导入或一次生成产生的题目批次
///
/// 批次本身没有身份，只是按顺序追加到会话题目列表中。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBatch(Vec<Question>);

impl QuestionBatch {
    pub fn new(questions: Vec<Question>) -> Self {
        Self(questions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Question> {
        self.0
    }
}

impl IntoIterator for QuestionBatch {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBatch {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Question> for QuestionBatch {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_blank_question_or_answer() {
        assert!(Question::new("q-1", "   ", "answer", "", DifficultyLevel::Easy).is_none());
        assert!(Question::new("q-1", "question", "", "", DifficultyLevel::Easy).is_none());
        assert!(Question::new("q-1", "question", "answer", "", DifficultyLevel::Easy).is_some());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let q = Question::new(
            "excel-1",
            "What is RICE?",
            "A framework",
            "Strategy",
            DifficultyLevel::Easy,
        )
        .unwrap();

        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "excel-1",
                "question": "What is RICE?",
                "answer": "A framework",
                "topic": "Strategy",
                "difficultyLevel": "Easy"
            })
        );
    }

    #[test]
    fn deserialization_enforces_non_empty_text() {
        let bad = json!({ "id": "x", "question": "", "answer": "a" });
        assert!(serde_json::from_value::<Question>(bad).is_err());

        let good = json!({ "id": "x", "question": "q", "answer": "a" });
        let q: Question = serde_json::from_value(good).unwrap();
        assert_eq!(q.topic(), "");
        assert_eq!(q.difficulty_level(), DifficultyLevel::Medium);
    }

    #[test]
    fn batch_preserves_order() {
        let batch: QuestionBatch = (1..=3)
            .filter_map(|i| {
                Question::new(format!("q-{}", i), "q", "a", "", DifficultyLevel::Medium)
            })
            .collect();

        let ids: Vec<&str> = batch.iter().map(Question::id).collect();
        assert_eq!(ids, ["q-1", "q-2", "q-3"]);
    }
}
