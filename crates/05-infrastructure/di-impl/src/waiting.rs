//! 等待父作用域的作用域集合

use infrastructure_common::NodeId;

/// 等待集合
///
/// 记录因父作用域尚未构建而被推迟的作用域。同一作用域最多出现一次，
/// 再次推迟即视为父作用域永远无法解析。集合归属于单次校验，
/// 由调用方创建并在校验前后清空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitingSet {
    scopes: Vec<NodeId>,
}

impl WaitingSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入集合，已存在时返回 `false`
    pub fn insert(&mut self, scope: NodeId) -> bool {
        if self.contains(scope) {
            return false;
        }
        self.scopes.push(scope);
        true
    }

    /// 移出集合
    pub fn remove(&mut self, scope: NodeId) -> bool {
        let before = self.scopes.len();
        self.scopes.retain(|id| *id != scope);
        before != self.scopes.len()
    }

    /// 是否在集合中
    pub fn contains(&self, scope: NodeId) -> bool {
        self.scopes.contains(&scope)
    }

    /// 按推迟顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.scopes.iter().copied()
    }

    /// 集合大小
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// 清空集合
    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}
