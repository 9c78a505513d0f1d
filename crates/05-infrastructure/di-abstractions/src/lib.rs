//! # Dependency Injection Abstractions
//! 
//! 校验器依赖的外部协作者接口。校验核心只通过这些接口访问场景和依赖注入框架。
//! 
//! ## 核心接口
//! 
//! - [`NodeSource`] - 场景节点快照来源
//! - [`ScopeBackend`] - 作用域构建后端（由外部依赖注入框架提供）
//! - [`PathFormatter`] - 诊断用场景路径格式化

pub mod backend;
pub mod formatter;
pub mod source;

pub use backend::*;
pub use formatter::*;
pub use source::*;
