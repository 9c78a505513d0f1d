//! 校验工具构建器
//!
//! 使用构建者模式组装快照、设置和日志，生成可重复执行的 [`ValidationHarness`]。

use crate::harness::ValidationHarness;
use crate::logging::init_logging;
use crate::settings::{load_options, DEFAULT_ENV_PREFIX};
use crate::snapshot::SceneSnapshot;
use di_impl::SceneValidator;
use infrastructure_common::{InfrastructureError, ValidatorOptions};
use std::path::Path;
use tracing::info;

/// 校验工具构建器
#[derive(Debug, Default)]
pub struct ValidationHarnessBuilder {
    snapshot: Option<SceneSnapshot>,
    options: ValidatorOptions,
    logging_enabled: bool,
}

impl ValidationHarnessBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载场景快照
    pub fn with_snapshot_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, InfrastructureError> {
        self.snapshot = Some(SceneSnapshot::load(path)?);
        Ok(self)
    }

    /// 使用内存中的场景快照
    pub fn with_snapshot(mut self, snapshot: SceneSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// 从可选的配置文件和环境变量加载校验器选项
    pub fn with_settings(mut self, path: Option<&Path>) -> Result<Self, InfrastructureError> {
        self.options = load_options(path, DEFAULT_ENV_PREFIX)?;
        Ok(self)
    }

    /// 覆盖日志级别
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.options.logging.level = level.into();
        self
    }

    /// 是否在构建时初始化日志
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// 构建校验工具
    pub fn build(self) -> Result<ValidationHarness, InfrastructureError> {
        // 只有在明确启用时才初始化日志，避免测试中重复初始化
        if self.logging_enabled {
            init_logging(&self.options.logging)?;
        }

        let snapshot = self.snapshot.ok_or_else(|| InfrastructureError::BootstrapFailed {
            message: "未提供场景快照".to_string(),
        })?;

        info!("构建场景校验工具: {} 个节点", snapshot.nodes.len());
        let backend = snapshot.backend();
        let validator = SceneValidator::with_options(snapshot, backend, self.options);
        Ok(ValidationHarness::new(validator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::{SceneNode, ScopeConfig};
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_build_requires_snapshot() {
        let Err(err) = ValidationHarnessBuilder::new().build() else {
            panic!("构建应当因缺少场景快照而失败");
        };
        assert!(matches!(err, InfrastructureError::BootstrapFailed { .. }));
    }

    #[test]
    fn test_settings_reach_the_validator() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"max_listed_nodes = 3\n").unwrap();
        let snapshot = SceneSnapshot::new(vec![
            SceneNode::new(1, "Root").with_scope(ScopeConfig::root()),
        ]);

        let harness = ValidationHarnessBuilder::new()
            .with_snapshot(snapshot)
            .with_settings(Some(file.path()))
            .unwrap()
            .with_log_level("debug")
            .build()
            .unwrap();

        assert_eq!(harness.options().max_listed_nodes, Some(3));
        assert_eq!(harness.options().logging.level, "debug");
    }

    #[test]
    fn test_missing_snapshot_file() {
        let err = ValidationHarnessBuilder::new()
            .with_snapshot_file("/missing/scene.toml")
            .unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigError { .. }));
    }
}
