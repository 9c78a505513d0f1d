//! 错误类型定义

use crate::lifecycle::BuildState;
use crate::scene::{NodeId, UncoveredNode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("不支持的文件格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 场景快照错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("节点标识重复: {node}")]
    DuplicateNode { node: NodeId },

    #[error("节点 {node} 的父节点 {parent} 不存在")]
    DanglingParent { node: NodeId, parent: NodeId },

    #[error("节点 {node} 的父节点链存在循环")]
    CyclicHierarchy { node: NodeId },
}

/// 作用域后端构建错误
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("作用域 {scope} 的父作用域尚未构建")]
    ParentNotYetResolved { scope: String },

    #[error("作用域构建失败: {scope}, 原因: {source}")]
    Rejected {
        scope: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BackendError {
    /// 创建父作用域未解析错误
    pub fn parent_not_yet_resolved(scope: impl Into<String>) -> Self {
        Self::ParentNotYetResolved {
            scope: scope.into(),
        }
    }

    /// 创建后端拒绝错误
    pub fn rejected(
        scope: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Rejected {
            scope: scope.into(),
            source: source.into(),
        }
    }

    /// 是否为父作用域未解析错误
    pub fn is_parent_not_yet_resolved(&self) -> bool {
        matches!(self, Self::ParentNotYetResolved { .. })
    }
}

/// 生命周期管理错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("作用域不存在: {scope}")]
    UnknownScope { scope: NodeId },

    #[error("作用域 {scope} 状态转换无效: {from} -> {to}")]
    InvalidTransition {
        scope: NodeId,
        from: BuildState,
        to: BuildState,
    },
}

/// 作用域构建错误
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("({:.2} 秒) 作用域 {scope} 的父作用域{} 始终无法解析（缺失、循环或未激活）", secs(.elapsed), parent_label(.parent))]
    UnresolvableParent {
        scope: String,
        parent: Option<NodeId>,
        elapsed: Duration,
    },

    #[error("({:.2} 秒) 作用域 {scope} 构建失败: {source}", secs(.elapsed))]
    Backend {
        scope: String,
        source: BackendError,
        elapsed: Duration,
    },

    #[error("({:.2} 秒) 作用域状态异常: {source}", secs(.elapsed))]
    Lifecycle {
        source: LifecycleError,
        elapsed: Duration,
    },
}

impl BuildError {
    /// 失败时的耗时
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::UnresolvableParent { elapsed, .. }
            | Self::Backend { elapsed, .. }
            | Self::Lifecycle { elapsed, .. } => *elapsed,
        }
    }

    /// 错误类别
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnresolvableParent { .. } => FailureKind::UnresolvableParent,
            Self::Backend { .. } => FailureKind::BuildBackendError,
            Self::Lifecycle { .. } => FailureKind::InvalidBuildState,
        }
    }
}

/// 校验失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// 场景快照无效
    InvalidScene,
    /// 没有激活的作用域
    NoScopesFound,
    /// 父作用域无法解析
    UnresolvableParent,
    /// 后端拒绝构建作用域
    BuildBackendError,
    /// 作用域状态机被违反
    InvalidBuildState,
    /// 存在未覆盖的注入候选
    MissingAutoInjection,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 校验错误类型
///
/// 所有变体都是终止性的，不存在部分成功。
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("({:.2} 秒) 场景快照无效: {source}", secs(.elapsed))]
    InvalidScene {
        source: SceneError,
        elapsed: Duration,
    },

    #[error("({:.2} 秒) 场景中没有找到激活的作用域", secs(.elapsed))]
    NoScopesFound { elapsed: Duration },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("({:.2} 秒) {} 个节点声明了可注入成员，但未登记在任何作用域的自动注入列表中", secs(.elapsed), .missing.len())]
    MissingAutoInjection {
        missing: Vec<UncoveredNode>,
        elapsed: Duration,
    },
}

impl ValidationError {
    /// 失败时的耗时
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::InvalidScene { elapsed, .. }
            | Self::NoScopesFound { elapsed }
            | Self::MissingAutoInjection { elapsed, .. } => *elapsed,
            Self::Build(err) => err.elapsed(),
        }
    }

    /// 错误类别
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidScene { .. } => FailureKind::InvalidScene,
            Self::NoScopesFound { .. } => FailureKind::NoScopesFound,
            Self::Build(err) => err.kind(),
            Self::MissingAutoInjection { .. } => FailureKind::MissingAutoInjection,
        }
    }

    /// 未覆盖的注入候选，其他错误返回空切片
    pub fn uncovered(&self) -> &[UncoveredNode] {
        match self {
            Self::MissingAutoInjection { missing, .. } => missing,
            _ => &[],
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

fn secs(elapsed: &Duration) -> f64 {
    elapsed.as_secs_f64()
}

fn parent_label(parent: &Option<NodeId>) -> String {
    parent.map(|id| format!(" {id}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_kind_and_elapsed() {
        let err = BuildError::UnresolvableParent {
            scope: "ChildScope".to_string(),
            parent: Some(NodeId(1)),
            elapsed: Duration::from_millis(1500),
        };

        assert_eq!(err.kind(), FailureKind::UnresolvableParent);
        assert_eq!(err.elapsed(), Duration::from_millis(1500));
        assert!(err.to_string().contains("ChildScope"));
        assert!(err.to_string().contains("1.50"));

        let err = ValidationError::from(err);
        assert_eq!(err.kind(), FailureKind::UnresolvableParent);
        assert!(err.uncovered().is_empty());
    }

    #[test]
    fn test_backend_error_wraps_cause() {
        let err = BackendError::rejected("GameScope", "duplicate registration");
        assert!(!err.is_parent_not_yet_resolved());
        assert!(err.to_string().contains("duplicate registration"));
        assert!(BackendError::parent_not_yet_resolved("GameScope").is_parent_not_yet_resolved());
    }
}
