//! 测验会话 - 流程层
//!
//! 核心职责：持有累积的题目列表，以及当前选中题目和是否显示答案。
//! 导入和生成服务只产出批次，合并批次是会话独有的职责。

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::models::{Question, QuestionBatch};
use crate::workflow::question_filter::QuestionFilter;

/// 会话内唯一的题目编号
///
/// 批次内的 ID（`excel-<n>`、`generated-<ts>-<n>`）只在批次内唯一，
/// 多个批次合并后可能重复，因此会话另外分配单调递增的编号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(u64);

impl SessionKey {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 会话中的一道题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub key: SessionKey,
    pub question: Question,
}

/// 测验会话
#[derive(Debug, Default)]
pub struct QuizSession {
    entries: Vec<SessionEntry>,
    next_key: u64,
    selected: Option<usize>,
    show_answer: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把一个批次追加到题目列表末尾，保持批次内顺序
    ///
    /// # 返回
    /// 追加的题目数量
    pub fn append_batch(&mut self, batch: QuestionBatch) -> usize {
        let existing: HashSet<&str> = self.entries.iter().map(|e| e.question.id()).collect();
        let duplicates = batch
            .iter()
            .filter(|q| existing.contains(q.id()))
            .count();
        if duplicates > 0 {
            warn!(
                "⚠️ 新批次中有 {} 个题目 ID 与已有题目重复，将以会话编号区分",
                duplicates
            );
        }

        let appended = batch.len();
        for question in batch {
            let key = SessionKey(self.next_key);
            self.next_key += 1;
            debug!("追加题目 {} {}", key, question);
            self.entries.push(SessionEntry { key, question });
        }

        info!("✓ 追加 {} 个题目，会话共 {} 个题目", appended, self.entries.len());
        appended
    }

    /// 清空所有题目和选中状态
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
        self.show_answer = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.entries.iter().map(|e| &e.question)
    }

    pub fn get(&self, key: SessionKey) -> Option<&Question> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.question)
    }

    /// 按条件筛选，返回原列表中的位置和题目
    pub fn filtered(&self, filter: &QuestionFilter) -> Vec<(usize, &Question)> {
        self.questions()
            .enumerate()
            .filter(|(_, q)| filter.matches(q))
            .collect()
    }

    /// 选中指定位置的题目，并隐藏答案；位置无效时不改变状态
    pub fn select(&mut self, index: usize) -> Option<&Question> {
        if index >= self.entries.len() {
            return None;
        }
        self.selected = Some(index);
        self.show_answer = false;
        self.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn current(&self) -> Option<&Question> {
        self.selected
            .and_then(|index| self.entries.get(index))
            .map(|e| &e.question)
    }

    /// 下一题；尚未选中时选中第一题，已在最后一题时不变
    pub fn next(&mut self) -> Option<&Question> {
        let target = match self.selected {
            Some(index) => index + 1,
            None => 0,
        };
        self.select(target)
    }

    /// 上一题；已在第一题或尚未选中时不变
    pub fn previous(&mut self) -> Option<&Question> {
        match self.selected {
            Some(index) if index > 0 => self.select(index - 1),
            _ => None,
        }
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    /// 切换答案显示状态
    pub fn toggle_answer(&mut self) -> bool {
        self.show_answer = !self.show_answer;
        self.show_answer
    }

    /// 隐藏答案，保持当前选中题目
    pub fn reset_answer(&mut self) {
        self.show_answer = false;
    }

    /// 当前进度百分比（四舍五入）
    pub fn progress_percent(&self) -> Option<u32> {
        let index = self.selected?;
        let total = self.entries.len();
        if total == 0 {
            return None;
        }
        Some((((index + 1) as f64 / total as f64) * 100.0).round() as u32)
    }
}
