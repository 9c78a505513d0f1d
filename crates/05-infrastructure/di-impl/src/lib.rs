//! # 场景依赖注入配置校验
//!
//! 在应用运行前校验场景树上的分层依赖注入配置是否自洽：
//!
//! 1. 按父子依赖顺序构建所有激活的作用域，容忍前向引用（推迟后唤醒）
//! 2. 检查每个声明了可注入成员的节点都被某个作用域的自动注入列表直接或通过祖先覆盖
//!
//! ## 基本使用
//!
//! ```rust
//! use di_abstractions::StaticNodeSource;
//! use di_impl::{SceneGraph, SceneScopeBackend, SceneValidator};
//! use infrastructure_common::{SceneNode, ScopeConfig};
//!
//! let nodes = vec![
//!     SceneNode::new(1, "Root").with_scope(ScopeConfig::root().auto_inject(2)),
//!     SceneNode::new(2, "Player").with_injectable("input"),
//! ];
//! let graph = SceneGraph::from_nodes(nodes.clone()).unwrap();
//! let mut validator = SceneValidator::new(
//!     StaticNodeSource::new(nodes),
//!     SceneScopeBackend::new(&graph),
//! );
//!
//! assert!(validator.validate().is_success());
//! ```

pub mod backend;
pub mod builder;
pub mod coverage;
pub mod graph;
pub mod registry;
pub mod reporter;
pub mod validator;
pub mod waiting;

pub use backend::{MissingAutoInjectNode, SceneScopeBackend};
pub use builder::ScopeBuilder;
pub use coverage::CoverageChecker;
pub use graph::{Ancestors, SceneGraph};
pub use registry::ScopeRegistry;
pub use reporter::{RunSummary, ValidationOutcome, ValidationReport, ValidationReporter};
pub use validator::SceneValidator;
pub use waiting::WaitingSet;
