//! 作用域构建调度
//!
//! 单趟遍历作用域序列，父作用域尚未构建的作用域进入等待集合。
//! 某个作用域构建完成后，立即唤醒等待该作用域的子作用域（级联）。
//! 被唤醒后仍然无法解析父作用域、或趟结束时仍在等待的作用域都是致命错误，
//! 不会进行第二趟遍历。

use crate::waiting::WaitingSet;
use di_abstractions::ScopeBackend;
use infrastructure_common::{
    BackendError, BuildError, BuildState, BuildStates, LifecycleError, NodeId, Scope,
};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, trace};

/// 作用域构建器
#[derive(Debug, Clone, Copy)]
pub struct ScopeBuilder {
    started: Instant,
}

impl ScopeBuilder {
    /// 创建构建器，`started` 用于计算失败时的耗时
    pub fn new(started: Instant) -> Self {
        Self { started }
    }

    /// 按顺序构建所有作用域
    ///
    /// 成功时所有作用域都处于 `Built` 状态。无论成功与否，返回前都会解除
    /// 已构建作用域的父作用域运行期引用，并清空等待集合。
    pub fn build_all<B>(
        &self,
        backend: &mut B,
        scopes: &[Scope],
        waiting: &mut WaitingSet,
    ) -> Result<BuildStates, BuildError>
    where
        B: ScopeBackend + ?Sized,
    {
        waiting.clear();
        let mut states = BuildStates::new(scopes);

        let result = BuildPass {
            builder: self,
            backend: &mut *backend,
            lookup: scopes.iter().map(|scope| (scope.node, scope)).collect(),
            states: &mut states,
            waiting: &mut *waiting,
        }
        .run(scopes);

        for scope in scopes {
            if states.is_built(scope.node) {
                backend.detach_parent(scope);
            }
        }
        waiting.clear();

        result.map(|()| states)
    }

    fn unresolvable(&self, scope: &Scope) -> BuildError {
        BuildError::UnresolvableParent {
            scope: scope.name.clone(),
            parent: scope.parent,
            elapsed: self.started.elapsed(),
        }
    }

    fn backend_failure(&self, scope: &Scope, source: BackendError) -> BuildError {
        BuildError::Backend {
            scope: scope.name.clone(),
            source,
            elapsed: self.started.elapsed(),
        }
    }

    fn lifecycle_failure(&self, source: LifecycleError) -> BuildError {
        BuildError::Lifecycle {
            source,
            elapsed: self.started.elapsed(),
        }
    }
}

struct BuildPass<'a, B: ?Sized> {
    builder: &'a ScopeBuilder,
    backend: &'a mut B,
    lookup: HashMap<NodeId, &'a Scope>,
    states: &'a mut BuildStates,
    waiting: &'a mut WaitingSet,
}

impl<'a, B> BuildPass<'a, B>
where
    B: ScopeBackend + ?Sized,
{
    fn run(mut self, scopes: &'a [Scope]) -> Result<(), BuildError> {
        for scope in scopes {
            // 已被唤醒构建的作用域不再重复构建
            if self.states.get(scope.node) != Some(BuildState::Unbuilt) {
                continue;
            }
            self.build_cascading(scope)?;
        }

        let stranded: Vec<&'a Scope> = self
            .waiting
            .iter()
            .filter_map(|id| self.lookup.get(&id).copied())
            .collect();
        if let Some(&scope) = stranded.first() {
            debug!(
                "作用域 {} 在遍历结束时仍在等待父作用域，共 {} 个",
                scope.name,
                stranded.len()
            );
            for waiting in &stranded {
                self.states
                    .mark_failed(waiting.node)
                    .map_err(|err| self.builder.lifecycle_failure(err))?;
            }
            return Err(self.builder.unresolvable(scope));
        }

        Ok(())
    }

    fn build_cascading(&mut self, scope: &'a Scope) -> Result<(), BuildError> {
        let mut queue = VecDeque::from([scope]);

        while let Some(current) = queue.pop_front() {
            match self.backend.build(current, self.states) {
                Ok(()) => {
                    self.waiting.remove(current.node);
                    self.states
                        .mark_built(current.node)
                        .map_err(|err| self.builder.lifecycle_failure(err))?;
                    trace!("作用域构建完成: {}", current.name);

                    let woken: Vec<&'a Scope> = self
                        .waiting
                        .iter()
                        .filter_map(|id| self.lookup.get(&id).copied())
                        .filter(|waiting| waiting.parent == Some(current.node))
                        .collect();
                    for child in &woken {
                        debug!("父作用域 {} 已构建，唤醒作用域 {}", current.name, child.name);
                    }
                    queue.extend(woken);
                }
                Err(err) if err.is_parent_not_yet_resolved() && !current.is_root => {
                    if !self.waiting.insert(current.node) {
                        self.states
                            .mark_failed(current.node)
                            .map_err(|err| self.builder.lifecycle_failure(err))?;
                        return Err(self.builder.unresolvable(current));
                    }
                    debug!("作用域 {} 的父作用域尚未构建，推迟构建", current.name);
                }
                Err(err) => {
                    self.states
                        .mark_failed(current.node)
                        .map_err(|err| self.builder.lifecycle_failure(err))?;
                    return Err(self.builder.backend_failure(current, err));
                }
            }
        }

        Ok(())
    }
}
