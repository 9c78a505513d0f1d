//! 场景节点数据模型
//!
//! 节点由外部场景系统创建和销毁，校验器只读取节点快照。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点标识（不透明句柄）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// 场景节点
///
/// `injectable_members` 是节点定义中声明的需要依赖注入的成员标记，
/// 非空即表示该节点是一个注入候选。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// 节点标识
    pub id: NodeId,
    /// 显示名称
    pub name: String,
    /// 父节点，根节点为 `None`
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// 节点自身是否激活
    #[serde(default = "default_true")]
    pub active: bool,
    /// 声明的可注入成员
    #[serde(default)]
    pub injectable_members: Vec<String>,
    /// 作用域配置（仅作用域节点拥有）
    #[serde(default)]
    pub scope: Option<ScopeConfig>,
}

impl SceneNode {
    /// 创建新的激活节点
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            active: true,
            injectable_members: Vec::new(),
            scope: None,
        }
    }

    /// 设置父节点
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// 设置激活状态
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// 添加可注入成员标记
    pub fn with_injectable(mut self, member: impl Into<String>) -> Self {
        self.injectable_members.push(member.into());
        self
    }

    /// 挂载作用域配置
    pub fn with_scope(mut self, scope: ScopeConfig) -> Self {
        self.scope = Some(scope);
        self
    }

    /// 是否声明了可注入成员
    pub fn is_injectable(&self) -> bool {
        !self.injectable_members.is_empty()
    }

    /// 是否为作用域节点
    pub fn is_scope(&self) -> bool {
        self.scope.is_some()
    }
}

/// 作用域配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// 是否为根作用域
    #[serde(default)]
    pub is_root: bool,
    /// 父作用域所在节点（延迟解析）
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// 自动注入节点列表，登记祖先节点即覆盖整棵子树
    #[serde(default)]
    pub auto_inject: Vec<NodeId>,
    /// 作用域组件是否启用
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ScopeConfig {
    /// 创建根作用域配置
    pub fn root() -> Self {
        Self {
            is_root: true,
            parent: None,
            auto_inject: Vec::new(),
            enabled: true,
        }
    }

    /// 创建子作用域配置
    pub fn child_of(parent: impl Into<NodeId>) -> Self {
        Self {
            is_root: false,
            parent: Some(parent.into()),
            auto_inject: Vec::new(),
            enabled: true,
        }
    }

    /// 登记自动注入节点
    pub fn auto_inject(mut self, node: impl Into<NodeId>) -> Self {
        self.auto_inject.push(node.into());
        self
    }

    /// 设置启用状态
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// 未被任何作用域覆盖的注入候选
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncoveredNode {
    /// 节点标识
    pub node: NodeId,
    /// 节点名称
    pub name: String,
    /// 从根到节点的场景路径
    pub path: String,
}

fn default_true() -> bool {
    true
}
