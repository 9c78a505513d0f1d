//! 校验器设置加载
//!
//! 依次叠加可选的配置文件和带前缀的环境变量，例如
//! `SCENE_VALIDATOR__PATH_SEPARATOR`、`SCENE_VALIDATOR__LOGGING__LEVEL`。

use infrastructure_common::{ConfigError, ValidatorOptions};
use std::path::Path;
use tracing::debug;

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "SCENE_VALIDATOR";

/// 加载校验器选项
pub fn load_options(path: Option<&Path>, env_prefix: &str) -> Result<ValidatorOptions, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        debug!("加载校验器配置文件: {}", path.display());
        builder = builder.add_source(config::File::from(path));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(env_prefix)
            .separator("__")
            .try_parsing(true),
    );

    let options = builder
        .build()
        .and_then(|settings| settings.try_deserialize::<ValidatorOptions>())
        .map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
    options.validate()?;
    Ok(options)
}
