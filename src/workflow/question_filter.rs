//! 题目筛选
//!
//! 按关键字（题干或主题，不区分大小写）和难度筛选会话中的题目

use crate::models::{DifficultyLevel, Question};

/// 难度筛选条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(DifficultyLevel),
}

impl DifficultyFilter {
    /// 从标签解析，`All` 表示不限难度
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "All" {
            return Some(DifficultyFilter::All);
        }
        DifficultyLevel::from_label(s).map(DifficultyFilter::Only)
    }

    pub fn matches(self, level: DifficultyLevel) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted == level,
        }
    }
}

/// 题目筛选条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    search_term: String,
    difficulty: DifficultyFilter,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into().to_lowercase();
        self
    }

    pub fn difficulty(mut self, difficulty: DifficultyFilter) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn matches(&self, question: &Question) -> bool {
        let matches_search = self.search_term.is_empty()
            || question.question().to_lowercase().contains(&self.search_term)
            || question.topic().to_lowercase().contains(&self.search_term);

        matches_search && self.difficulty.matches(question.difficulty_level())
    }

    /// 按原顺序返回符合条件的题目
    pub fn apply<'a, I>(&self, questions: I) -> Vec<&'a Question>
    where
        I: IntoIterator<Item = &'a Question>,
    {
        questions.into_iter().filter(|q| self.matches(q)).collect()
    }

    /// 返回 (符合条件数, 总数)
    pub fn count<'a, I>(&self, questions: I) -> (usize, usize)
    where
        I: IntoIterator<Item = &'a Question>,
    {
        questions
            .into_iter()
            .fold((0, 0), |(hits, total), q| (hits + usize::from(self.matches(q)), total + 1))
    }
}
