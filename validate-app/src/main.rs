//! # 场景校验命令行工具
//!
//! 在编辑器之外（例如 CI）校验场景依赖注入配置快照。结果输出到标准输出，
//! 日志输出到标准错误。

use anyhow::{bail, Context, Result};
use clap::Parser;
use infrastructure_composition::ValidationHarness;
use std::path::PathBuf;
use std::process::{Command, ExitCode, ExitStatus};
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "scene-validate")]
#[command(about = "校验场景依赖注入配置快照")]
struct Args {
    /// 场景快照文件（.json 或 .toml）
    snapshot: PathBuf,

    /// 校验器配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别，覆盖配置文件中的设置
    #[arg(long)]
    log_level: Option<String>,

    /// 以 JSON 格式输出结果
    #[arg(long)]
    json: bool,

    /// 校验通过后执行的命令
    #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "CMD")]
    then: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut builder = ValidationHarness::builder()
        .with_settings(args.config.as_deref())
        .context("加载校验器配置失败")?;
    if let Some(level) = args.log_level {
        builder = builder.with_log_level(level);
    }

    let mut harness = builder
        .enable_logging(true)
        .with_snapshot_file(&args.snapshot)
        .with_context(|| format!("加载场景快照失败: {}", args.snapshot.display()))?
        .build()?;

    let outcome = if args.then.is_empty() {
        let report = harness.run();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", harness.render(&report.outcome));
        }
        report.outcome
    } else {
        let mut launched = None;
        let outcome = harness.run_and_proceed(|| launched = Some(launch(&args.then)));
        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!("{}", harness.render(&outcome));
        }

        if let Some(status) = launched.transpose()? {
            if !status.success() {
                bail!("后续命令执行失败: {}", status);
            }
        }
        outcome
    };

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// 执行校验通过后的命令
fn launch(command: &[String]) -> Result<ExitStatus> {
    let Some((program, rest)) = command.split_first() else {
        bail!("后续命令为空");
    };

    info!("校验通过，执行后续命令: {}", command.join(" "));
    Command::new(program)
        .args(rest)
        .status()
        .with_context(|| format!("无法执行命令: {program}"))
}
