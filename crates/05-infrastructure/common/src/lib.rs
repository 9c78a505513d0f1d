//! # Infrastructure Common
//!
//! 场景依赖注入校验器的公共数据模型和错误类型。
//!
//! ## 核心类型
//!
//! - [`SceneNode`] - 场景树中的节点快照
//! - [`ScopeConfig`] - 节点上声明的作用域配置
//! - [`Scope`] - 一次校验中被发现的作用域
//! - [`BuildStates`] - 作用域构建状态表（单向状态机）
//! - [`ValidationError`] - 一次校验的致命错误
//!
//! ## 设计原则
//!
//! - 核心只读取节点，从不修改场景树结构
//! - 所有运行期状态都归属于单次校验
//! - 所有错误都是终止性的，携带耗时信息

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod scene;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use scene::*;
