//! 场景节点来源抽象接口

use infrastructure_common::{SceneError, SceneNode};

/// 场景节点来源 trait
///
/// 提供当前场景的完整节点快照，包括未激活的节点；激活状态由校验核心自行过滤。
pub trait NodeSource: Send + Sync {
    /// 获取全部节点
    fn all_nodes(&self) -> Result<Vec<SceneNode>, SceneError>;
}

/// 固定节点列表来源
#[derive(Debug, Clone, Default)]
pub struct StaticNodeSource {
    nodes: Vec<SceneNode>,
}

impl StaticNodeSource {
    /// 创建新的固定节点来源
    pub fn new(nodes: Vec<SceneNode>) -> Self {
        Self { nodes }
    }
}

impl From<Vec<SceneNode>> for StaticNodeSource {
    fn from(nodes: Vec<SceneNode>) -> Self {
        Self::new(nodes)
    }
}

impl NodeSource for StaticNodeSource {
    fn all_nodes(&self) -> Result<Vec<SceneNode>, SceneError> {
        Ok(self.nodes.clone())
    }
}

impl<T: NodeSource + ?Sized> NodeSource for &T {
    fn all_nodes(&self) -> Result<Vec<SceneNode>, SceneError> {
        (**self).all_nodes()
    }
}
