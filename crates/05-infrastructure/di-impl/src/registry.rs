//! 作用域发现

use crate::graph::SceneGraph;
use infrastructure_common::{Scope, ValidationError};
use std::time::Instant;
use tracing::debug;

/// 作用域注册表
///
/// 从场景快照中发现处于激活状态且启用的作用域，没有副作用。
#[derive(Debug, Clone, Copy)]
pub struct ScopeRegistry {
    started: Instant,
}

impl ScopeRegistry {
    /// 创建注册表，`started` 用于计算失败时的耗时
    pub fn new(started: Instant) -> Self {
        Self { started }
    }

    /// 按发现顺序返回所有激活且启用的作用域
    ///
    /// 没有任何作用域时返回 [`ValidationError::NoScopesFound`]。
    pub fn discover(&self, graph: &SceneGraph) -> Result<Vec<Scope>, ValidationError> {
        let scopes: Vec<Scope> = graph
            .nodes()
            .filter(|node| node.scope.as_ref().is_some_and(|config| config.enabled))
            .filter(|node| graph.is_active_in_hierarchy(node.id))
            .filter_map(Scope::from_node)
            .collect();

        if scopes.is_empty() {
            return Err(ValidationError::NoScopesFound {
                elapsed: self.started.elapsed(),
            });
        }

        debug!("发现 {} 个激活的作用域", scopes.len());
        Ok(scopes)
    }
}
