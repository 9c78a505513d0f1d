//! 校验工具
//!
//! 外部调用方（编辑器命令、CI 钩子）使用的入口，负责把校验结果写入日志。

use crate::snapshot::SceneSnapshot;
use di_impl::{SceneScopeBackend, SceneValidator, ValidationOutcome, ValidationReport};
use infrastructure_common::ValidatorOptions;
use tracing::{error, info};

/// 基于场景快照的校验工具
pub struct ValidationHarness {
    validator: SceneValidator<SceneSnapshot, SceneScopeBackend>,
}

impl ValidationHarness {
    /// 包装一个校验器
    pub fn new(validator: SceneValidator<SceneSnapshot, SceneScopeBackend>) -> Self {
        Self { validator }
    }

    /// 创建构建器
    pub fn builder() -> crate::builder::ValidationHarnessBuilder {
        crate::builder::ValidationHarnessBuilder::new()
    }

    /// 校验器选项
    pub fn options(&self) -> &ValidatorOptions {
        self.validator.options()
    }

    /// 执行一次校验并生成报告
    pub fn run(&mut self) -> ValidationReport {
        let report = self.validator.report();
        self.log(&report.outcome);
        report
    }

    /// 执行一次校验，通过后调用 `proceed`
    pub fn run_and_proceed<F>(&mut self, proceed: F) -> ValidationOutcome
    where
        F: FnOnce(),
    {
        let outcome = self.validator.validate_and_proceed(proceed);
        self.log(&outcome);
        outcome
    }

    /// 渲染校验结果
    pub fn render(&self, outcome: &ValidationOutcome) -> String {
        self.validator.render(outcome)
    }

    fn log(&self, outcome: &ValidationOutcome) {
        let text = self.render(outcome);
        if outcome.is_success() {
            info!("{}", text);
        } else {
            error!("{}", text);
        }
    }
}
