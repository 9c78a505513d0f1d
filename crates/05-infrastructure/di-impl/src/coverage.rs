//! 自动注入覆盖检查
//!
//! 候选节点本身被登记，或其任一祖先被登记时即视为被覆盖。

use crate::graph::SceneGraph;
use di_abstractions::PathFormatter;
use infrastructure_common::{NodeId, Scope, SceneNode, UncoveredNode};
use std::collections::HashSet;

/// 覆盖检查器
///
/// 纯函数式检查，不修改任何输入。
pub struct CoverageChecker<'a, P: ?Sized> {
    graph: &'a SceneGraph,
    formatter: &'a P,
    include_inactive: bool,
}

impl<'a, P> CoverageChecker<'a, P>
where
    P: PathFormatter + ?Sized,
{
    /// 创建覆盖检查器，默认未激活节点也参与检查
    pub fn new(graph: &'a SceneGraph, formatter: &'a P) -> Self {
        Self {
            graph,
            formatter,
            include_inactive: true,
        }
    }

    /// 设置未激活节点是否参与检查
    pub fn include_inactive(mut self, include: bool) -> Self {
        self.include_inactive = include;
        self
    }

    /// 注入候选：声明了可注入成员的节点，按发现顺序
    pub fn candidates(&self) -> Vec<&'a SceneNode> {
        let graph = self.graph;
        graph
            .nodes()
            .filter(|node| node.is_injectable())
            .filter(|node| self.include_inactive || graph.is_active_in_hierarchy(node.id))
            .collect()
    }

    /// 所有作用域自动注入列表的并集
    pub fn registry(scopes: &[Scope]) -> HashSet<NodeId> {
        scopes
            .iter()
            .flat_map(|scope| scope.auto_inject.iter().copied())
            .collect()
    }

    /// 节点是否被登记节点直接或通过祖先覆盖
    pub fn is_covered(&self, node: NodeId, registry: &HashSet<NodeId>) -> bool {
        registry
            .iter()
            .any(|&registered| registered == node || self.graph.is_descendant_of(node, registered))
    }

    /// 找出未被任何作用域覆盖的注入候选，保持发现顺序并附带场景路径
    pub fn find_uncovered(&self, scopes: &[Scope]) -> Vec<UncoveredNode> {
        let registry = Self::registry(scopes);

        self.candidates()
            .into_iter()
            .filter(|candidate| !self.is_covered(candidate.id, &registry))
            .map(|candidate| UncoveredNode {
                node: candidate.id,
                name: candidate.name.clone(),
                path: self.formatter.format(&self.graph.path_segments(candidate.id)),
            })
            .collect()
    }
}
