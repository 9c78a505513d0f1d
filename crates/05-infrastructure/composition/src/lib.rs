//! # 基础设施组合层
//!
//! 将场景快照、校验器设置和日志系统组合成一个可直接调用的校验工具，
//! 供编辑器命令、CI 钩子和测试工具使用。
//!
//! ## 主要功能
//!
//! - **场景快照**: 从 JSON / TOML 文件加载节点快照
//! - **设置加载**: 叠加配置文件和环境变量
//! - **日志初始化**: 基于 `tracing-subscriber` 的文本或 JSON 输出
//! - **校验工具构建器**: 使用构建者模式组装校验工具
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::ValidationHarness;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut harness = ValidationHarness::builder()
//!         .with_snapshot_file("scene.toml")?
//!         .build()?;
//!
//!     let report = harness.run();
//!     println!("{}", harness.render(&report.outcome));
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod harness;
pub mod logging;
pub mod settings;
pub mod snapshot;

// 重新导出主要类型
pub use builder::ValidationHarnessBuilder;
pub use harness::ValidationHarness;
pub use logging::init_logging;
pub use settings::{load_options, DEFAULT_ENV_PREFIX};
pub use snapshot::SceneSnapshot;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
