//! 场景树只读视图

use infrastructure_common::{NodeId, SceneError, SceneNode};
use std::collections::{HashMap, HashSet};

/// 场景树
///
/// 由一次校验开始时的节点快照构建，之后不再变化。节点保持快照中的发现顺序。
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    index: HashMap<NodeId, usize>,
}

impl SceneGraph {
    /// 从节点快照构建场景树
    ///
    /// 拒绝重复标识、指向未知节点的父引用以及循环的父节点链。
    pub fn from_nodes(nodes: Vec<SceneNode>) -> Result<Self, SceneError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                return Err(SceneError::DuplicateNode { node: node.id });
            }
        }

        for node in &nodes {
            if let Some(parent) = node.parent.filter(|parent| !index.contains_key(parent)) {
                return Err(SceneError::DanglingParent {
                    node: node.id,
                    parent,
                });
            }
        }

        let graph = Self { nodes, index };
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// 节点数量
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 按发现顺序遍历所有节点
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// 获取节点
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.index.get(&id).map(|&position| &self.nodes[position])
    }

    /// 获取父节点
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// 从父节点向上遍历祖先，不包含节点自身
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.parent(id),
        }
    }

    /// `node` 是否为 `ancestor` 的严格后代
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// 节点自身及所有祖先是否都处于激活状态
    pub fn is_active_in_hierarchy(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        node.active
            && self
                .ancestors(id)
                .all(|ancestor| self.node(ancestor).is_some_and(|node| node.active))
    }

    /// 从根到节点的名称序列
    pub fn path_segments(&self, id: NodeId) -> Vec<&str> {
        let mut segments: Vec<&str> = self
            .ancestors(id)
            .filter_map(|ancestor| self.node(ancestor))
            .map(|node| node.name.as_str())
            .collect();
        segments.reverse();
        if let Some(node) = self.node(id) {
            segments.push(node.name.as_str());
        }
        segments
    }

    fn check_acyclic(&self) -> Result<(), SceneError> {
        let mut settled: HashSet<NodeId> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let mut chain = HashSet::new();
            let mut current = Some(node.id);
            while let Some(id) = current {
                if settled.contains(&id) {
                    break;
                }
                if !chain.insert(id) {
                    return Err(SceneError::CyclicHierarchy { node: id });
                }
                current = self.parent(id);
            }
            settled.extend(chain);
        }
        Ok(())
    }
}

/// 祖先迭代器
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.graph.parent(current);
        Some(current)
    }
}
