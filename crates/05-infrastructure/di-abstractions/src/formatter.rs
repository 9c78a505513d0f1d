//! 场景路径格式化

/// 场景路径格式化 trait
pub trait PathFormatter: Send + Sync {
    /// 将从根到节点的名称序列格式化为路径
    fn format(&self, segments: &[&str]) -> String;
}

/// 分隔符拼接的路径格式化器，默认使用 `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorPathFormatter {
    separator: String,
}

impl SeparatorPathFormatter {
    /// 使用指定分隔符创建格式化器
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for SeparatorPathFormatter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl PathFormatter for SeparatorPathFormatter {
    fn format(&self, segments: &[&str]) -> String {
        segments.join(&self.separator)
    }
}
