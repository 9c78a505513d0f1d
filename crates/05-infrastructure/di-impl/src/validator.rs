//! 场景校验入口

use crate::builder::ScopeBuilder;
use crate::coverage::CoverageChecker;
use crate::graph::SceneGraph;
use crate::registry::ScopeRegistry;
use crate::reporter::{RunSummary, ValidationOutcome, ValidationReport, ValidationReporter};
use crate::waiting::WaitingSet;
use di_abstractions::{NodeSource, ScopeBackend, SeparatorPathFormatter};
use infrastructure_common::{ValidationError, ValidatorOptions};
use std::time::Instant;
use tracing::debug;

/// 场景依赖注入配置校验器
///
/// 依次执行作用域发现、作用域构建和自动注入覆盖检查，任何一步失败都立即终止。
/// 每次校验都从节点来源重新获取快照，运行期状态不会残留到下一次校验。
pub struct SceneValidator<S, B> {
    source: S,
    backend: B,
    formatter: SeparatorPathFormatter,
    options: ValidatorOptions,
    reporter: ValidationReporter,
}

impl<S, B> SceneValidator<S, B>
where
    S: NodeSource,
    B: ScopeBackend,
{
    /// 使用默认选项创建校验器
    pub fn new(source: S, backend: B) -> Self {
        Self::with_options(source, backend, ValidatorOptions::default())
    }

    /// 使用指定选项创建校验器，路径分隔符取自选项
    pub fn with_options(source: S, backend: B, options: ValidatorOptions) -> Self {
        Self {
            formatter: SeparatorPathFormatter::new(options.path_separator.clone()),
            reporter: ValidationReporter::new(options.max_listed_nodes),
            source,
            backend,
            options,
        }
    }

    /// 校验选项
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// 作用域构建后端
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 执行一次校验，返回原始结果
    pub fn run(&mut self) -> Result<RunSummary, ValidationError> {
        let started = Instant::now();

        let graph = self
            .source
            .all_nodes()
            .and_then(SceneGraph::from_nodes)
            .map_err(|source| ValidationError::InvalidScene {
                source,
                elapsed: started.elapsed(),
            })?;
        debug!("场景快照包含 {} 个节点", graph.len());

        let scopes = ScopeRegistry::new(started).discover(&graph)?;

        let mut waiting = WaitingSet::new();
        let states = ScopeBuilder::new(started).build_all(&mut self.backend, &scopes, &mut waiting)?;

        let checker = CoverageChecker::new(&graph, &self.formatter)
            .include_inactive(self.options.include_inactive_candidates);
        let candidates = checker.candidates().len();
        let missing = checker.find_uncovered(&scopes);
        if !missing.is_empty() {
            return Err(ValidationError::MissingAutoInjection {
                missing,
                elapsed: started.elapsed(),
            });
        }

        Ok(RunSummary::new(
            states.built_count(),
            candidates,
            started.elapsed(),
        ))
    }

    /// 执行一次校验
    pub fn validate(&mut self) -> ValidationOutcome {
        let result = self.run();
        self.reporter.outcome(&result)
    }

    /// 执行一次校验并生成带时间戳的报告
    pub fn report(&mut self) -> ValidationReport {
        let result = self.run();
        self.reporter.report(&result)
    }

    /// 校验通过后调用 `proceed`，失败时不调用
    pub fn validate_and_proceed<F>(&mut self, proceed: F) -> ValidationOutcome
    where
        F: FnOnce(),
    {
        let outcome = self.validate();
        if outcome.is_success() {
            proceed();
        }
        outcome
    }

    /// 渲染校验结果
    pub fn render(&self, outcome: &ValidationOutcome) -> String {
        self.reporter.render(outcome)
    }
}
