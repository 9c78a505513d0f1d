//! 场景快照文件
//!
//! 支持 JSON 和 TOML 两种格式，内容为 `nodes` 节点数组。

use di_abstractions::NodeSource;
use di_impl::SceneScopeBackend;
use infrastructure_common::{ConfigError, SceneError, SceneNode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 场景快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// 全部节点，包括未激活的节点
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
}

impl SceneSnapshot {
    /// 创建快照
    pub fn new(nodes: Vec<SceneNode>) -> Self {
        Self { nodes }
    }

    /// 从文件加载快照，按扩展名选择格式
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let snapshot = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            Some("toml") => Self::from_toml(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        info!("加载场景快照: {} ({} 个节点)", path.display(), snapshot.nodes.len());
        Ok(snapshot)
    }

    /// 解析 JSON 快照
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// 解析 TOML 快照
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })
    }

    /// 基于快照节点创建作用域构建后端
    pub fn backend(&self) -> SceneScopeBackend {
        SceneScopeBackend::from_nodes(&self.nodes)
    }
}

impl NodeSource for SceneSnapshot {
    fn all_nodes(&self) -> Result<Vec<SceneNode>, SceneError> {
        Ok(self.nodes.clone())
    }
}
