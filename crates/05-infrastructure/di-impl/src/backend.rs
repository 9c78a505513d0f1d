//! 基于场景快照的作用域构建后端

use crate::graph::SceneGraph;
use di_abstractions::ScopeBackend;
use infrastructure_common::{BackendError, BuildStates, NodeId, SceneNode, Scope};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::trace;

/// 自动注入节点不存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAutoInjectNode {
    /// 缺失的节点
    pub node: NodeId,
}

impl fmt::Display for MissingAutoInjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "自动注入列表引用了不存在的节点 {}", self.node)
    }
}

impl std::error::Error for MissingAutoInjectNode {}

/// 场景快照后端
///
/// 在没有真实依赖注入框架时使用：检查父作用域是否已构建、自动注入列表是否引用
/// 了存在的节点，并记录构建期间建立的父作用域引用。
#[derive(Debug, Clone, Default)]
pub struct SceneScopeBackend {
    known_nodes: HashSet<NodeId>,
    parent_links: HashMap<NodeId, NodeId>,
}

impl SceneScopeBackend {
    /// 根据场景树创建后端
    pub fn new(graph: &SceneGraph) -> Self {
        Self::from_nodes(graph.nodes())
    }

    /// 根据节点列表创建后端
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a SceneNode>) -> Self {
        Self {
            known_nodes: nodes.into_iter().map(|node| node.id).collect(),
            parent_links: HashMap::new(),
        }
    }

    /// 当前的父作用域引用（子作用域 -> 父作用域）
    pub fn parent_links(&self) -> &HashMap<NodeId, NodeId> {
        &self.parent_links
    }
}

impl ScopeBackend for SceneScopeBackend {
    fn build(&mut self, scope: &Scope, states: &BuildStates) -> Result<(), BackendError> {
        let parent = if scope.is_root {
            None
        } else {
            match scope.parent {
                Some(parent) if states.is_built(parent) => Some(parent),
                _ => return Err(BackendError::parent_not_yet_resolved(&scope.name)),
            }
        };

        if let Some(&node) = scope
            .auto_inject
            .iter()
            .find(|node| !self.known_nodes.contains(*node))
        {
            return Err(BackendError::rejected(
                &scope.name,
                MissingAutoInjectNode { node },
            ));
        }

        if let Some(parent) = parent {
            trace!("建立父作用域引用: {} -> {}", scope.node, parent);
            self.parent_links.insert(scope.node, parent);
        }
        Ok(())
    }

    fn detach_parent(&mut self, scope: &Scope) {
        self.parent_links.remove(&scope.node);
    }
}
