//! 作用域构建后端抽象接口
//!
//! 实际的注册和容器构建由外部依赖注入框架完成，校验器只负责调度构建顺序。

use infrastructure_common::{BackendError, BuildStates, Scope};

/// 作用域构建后端 trait
pub trait ScopeBackend: Send {
    /// 构建单个作用域
    ///
    /// 非根作用域的父作用域在 `states` 中尚未处于 `Built` 状态时，
    /// 必须返回 [`BackendError::ParentNotYetResolved`]。
    fn build(&mut self, scope: &Scope, states: &BuildStates) -> Result<(), BackendError>;

    /// 解除构建时建立的父作用域运行期引用
    fn detach_parent(&mut self, scope: &Scope);
}

impl<T: ScopeBackend + ?Sized> ScopeBackend for &mut T {
    fn build(&mut self, scope: &Scope, states: &BuildStates) -> Result<(), BackendError> {
        (**self).build(scope, states)
    }

    fn detach_parent(&mut self, scope: &Scope) {
        (**self).detach_parent(scope);
    }
}

impl<T: ScopeBackend + ?Sized> ScopeBackend for Box<T> {
    fn build(&mut self, scope: &Scope, states: &BuildStates) -> Result<(), BackendError> {
        (**self).build(scope, states)
    }

    fn detach_parent(&mut self, scope: &Scope) {
        (**self).detach_parent(scope);
    }
}
