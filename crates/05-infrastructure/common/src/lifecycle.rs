//! 作用域生命周期管理

use crate::errors::LifecycleError;
use crate::scene::{NodeId, SceneNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 作用域构建状态
///
/// 状态转换是单向的：`Unbuilt -> Built` 或 `Unbuilt -> Failed`，不允许重建。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildState {
    /// 尚未构建
    Unbuilt,
    /// 构建完成
    Built,
    /// 构建失败
    Failed,
}

impl Default for BuildState {
    fn default() -> Self {
        Self::Unbuilt
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unbuilt => "Unbuilt",
            Self::Built => "Built",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// 一次校验中被发现的作用域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// 作用域所在节点
    pub node: NodeId,
    /// 节点名称
    pub name: String,
    /// 是否为根作用域
    pub is_root: bool,
    /// 声明的父作用域节点，可能无法解析
    pub parent: Option<NodeId>,
    /// 自动注入节点列表
    pub auto_inject: Vec<NodeId>,
}

impl Scope {
    /// 从携带作用域配置的节点创建作用域
    pub fn from_node(node: &SceneNode) -> Option<Self> {
        let config = node.scope.as_ref()?;
        Some(Self {
            node: node.id,
            name: node.name.clone(),
            is_root: config.is_root,
            parent: config.parent,
            auto_inject: config.auto_inject.clone(),
        })
    }
}

/// 作用域构建状态表
#[derive(Debug, Clone, Default)]
pub struct BuildStates {
    states: HashMap<NodeId, BuildState>,
}

impl BuildStates {
    /// 为给定作用域创建全部为 `Unbuilt` 的状态表
    pub fn new<'a>(scopes: impl IntoIterator<Item = &'a Scope>) -> Self {
        Self {
            states: scopes
                .into_iter()
                .map(|scope| (scope.node, BuildState::Unbuilt))
                .collect(),
        }
    }

    /// 获取作用域状态，未知作用域返回 `None`
    pub fn get(&self, scope: NodeId) -> Option<BuildState> {
        self.states.get(&scope).copied()
    }

    /// 作用域是否已构建
    pub fn is_built(&self, scope: NodeId) -> bool {
        self.get(scope) == Some(BuildState::Built)
    }

    /// 是否所有作用域都已构建
    pub fn all_built(&self) -> bool {
        self.states.values().all(|state| *state == BuildState::Built)
    }

    /// 已构建的作用域数量
    pub fn built_count(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state == BuildState::Built)
            .count()
    }

    /// 标记为已构建
    pub fn mark_built(&mut self, scope: NodeId) -> Result<(), LifecycleError> {
        self.transition(scope, BuildState::Built)
    }

    /// 标记为构建失败
    pub fn mark_failed(&mut self, scope: NodeId) -> Result<(), LifecycleError> {
        self.transition(scope, BuildState::Failed)
    }

    fn transition(&mut self, scope: NodeId, to: BuildState) -> Result<(), LifecycleError> {
        let state = self
            .states
            .get_mut(&scope)
            .ok_or(LifecycleError::UnknownScope { scope })?;

        if *state != BuildState::Unbuilt {
            return Err(LifecycleError::InvalidTransition {
                scope,
                from: *state,
                to,
            });
        }

        *state = to;
        Ok(())
    }
}
