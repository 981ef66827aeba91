use std::collections::HashMap;

/// 可识别的表格列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Question,
    Answer,
    Topic,
    DifficultyLevel,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Question,
        Column::Answer,
        Column::Topic,
        Column::DifficultyLevel,
    ];

    /// 表头中的列名
    pub fn header(self) -> &'static str {
        match self {
            Column::Question => "Question",
            Column::Answer => "Answer",
            Column::Topic => "Topic",
            Column::DifficultyLevel => "Difficulty Level",
        }
    }

    /// 从表头文本解析列（精确匹配，区分大小写）
    pub fn from_header(s: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.header() == s)
    }
}

/// 表格中的一行原始数据（只在导入过程中存在）
///
/// 只保存可识别列的值，其他列在投影时已被忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: HashMap<Column, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: Column, value: impl Into<String>) {
        self.values.insert(column, value.into());
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.values.get(&column).map(String::as_str)
    }

    /// 取列值，缺失时为空字符串
    pub fn text(&self, column: Column) -> &str {
        self.get(column).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matching_is_exact() {
        assert_eq!(Column::from_header("Difficulty Level"), Some(Column::DifficultyLevel));
        assert_eq!(Column::from_header("question"), None);
        assert_eq!(Column::from_header("Difficulty"), None);
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let row = RawRow::new().with(Column::Question, "Why?");
        assert_eq!(row.text(Column::Question), "Why?");
        assert_eq!(row.text(Column::Answer), "");
        assert_eq!(row.get(Column::Topic), None);
    }
}
