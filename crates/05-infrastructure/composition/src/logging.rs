//! 日志系统初始化

use infrastructure_common::{InfrastructureError, LoggingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志系统
///
/// 日志写入标准错误。设置了 `RUST_LOG` 时优先使用环境变量中的过滤指令。
pub fn init_logging(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::BootstrapFailed {
                message: format!("日志级别无效: {}: {}", config.level, e),
            }
        })?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_writer(std::io::stderr);

    if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "???".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(InfrastructureError::BootstrapFailed { .. })
        ));
    }
}
