//! 校验器配置

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// 校验器选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// 未激活节点上的可注入成员是否也参与覆盖检查
    pub include_inactive_candidates: bool,
    /// 场景路径分隔符
    pub path_separator: String,
    /// 报告中最多列出的未覆盖节点数量，结构化结果不受影响
    pub max_listed_nodes: Option<usize>,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            include_inactive_candidates: true,
            path_separator: "/".to_string(),
            max_listed_nodes: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ValidatorOptions {
    /// 检查选项取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_separator.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "path_separator 不能为空".to_string(),
            });
        }
        if self.max_listed_nodes == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "max_listed_nodes 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别或 `EnvFilter` 指令
    pub level: String,
    /// 是否使用 JSON 格式
    pub json: bool,
    /// 是否显示目标
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            show_target: true,
        }
    }
}
