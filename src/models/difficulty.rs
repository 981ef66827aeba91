use serde::{Deserialize, Serialize};

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// 简单
    Easy,
    /// 中等（缺省值）
    #[default]
    Medium,
    /// 困难
    Hard,
}

impl DifficultyLevel {
    /// 所有难度，按从易到难排列
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }

    /// 从标签解析难度（精确匹配，区分大小写）
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(DifficultyLevel::Easy),
            "Medium" => Some(DifficultyLevel::Medium),
            "Hard" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    /// 解析难度，无法识别时退回 `Medium`
    pub fn from_label_or_default(s: &str) -> Self {
        Self::from_label(s).unwrap_or_default()
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
