//! 校验结果报告

use infrastructure_common::{FailureKind, UncoveredNode, ValidationError};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

/// 一次成功校验的统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// 构建完成的作用域数量
    pub scopes_built: usize,
    /// 检查过的注入候选数量
    pub candidates_checked: usize,
    /// 总耗时（秒）
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// 创建统计
    pub fn new(scopes_built: usize, candidates_checked: usize, elapsed: Duration) -> Self {
        Self {
            scopes_built,
            candidates_checked,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }
}

/// 校验结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// 校验通过
    Success {
        /// 总耗时（秒）
        elapsed_seconds: f64,
    },
    /// 校验失败
    Failure {
        /// 失败类别
        kind: FailureKind,
        /// 可读的失败信息
        message: String,
        /// 总耗时（秒）
        elapsed_seconds: f64,
        /// 未覆盖的注入候选
        #[serde(skip_serializing_if = "Vec::is_empty")]
        uncovered: Vec<UncoveredNode>,
    },
}

impl ValidationOutcome {
    /// 是否通过
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 失败类别
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// 总耗时（秒）
    pub fn elapsed_seconds(&self) -> f64 {
        match self {
            Self::Success { elapsed_seconds } | Self::Failure { elapsed_seconds, .. } => {
                *elapsed_seconds
            }
        }
    }
}

/// 带时间戳的结构化报告
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// 校验完成时间
    pub validated_at: chrono::DateTime<chrono::Utc>,
    /// 校验结果
    pub outcome: ValidationOutcome,
    /// 成功时的统计
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

/// 校验结果报告器
#[derive(Debug, Clone, Default)]
pub struct ValidationReporter {
    max_listed: Option<usize>,
}

impl ValidationReporter {
    /// 创建报告器，`max_listed` 限制失败信息中列出的节点数量
    pub fn new(max_listed: Option<usize>) -> Self {
        Self { max_listed }
    }

    /// 将一次校验的结果转换为对外结果
    pub fn outcome(&self, result: &Result<RunSummary, ValidationError>) -> ValidationOutcome {
        match result {
            Ok(summary) => ValidationOutcome::Success {
                elapsed_seconds: summary.elapsed_seconds,
            },
            Err(err) => ValidationOutcome::Failure {
                kind: err.kind(),
                message: self.failure_message(err),
                elapsed_seconds: err.elapsed().as_secs_f64(),
                uncovered: err.uncovered().to_vec(),
            },
        }
    }

    /// 生成带时间戳的结构化报告
    pub fn report(&self, result: &Result<RunSummary, ValidationError>) -> ValidationReport {
        ValidationReport {
            validated_at: chrono::Utc::now(),
            outcome: self.outcome(result),
            summary: result.as_ref().ok().cloned(),
        }
    }

    /// 渲染为一段可读文本
    pub fn render(&self, outcome: &ValidationOutcome) -> String {
        match outcome {
            ValidationOutcome::Success { elapsed_seconds } => {
                format!("场景依赖注入校验通过 ({elapsed_seconds:.2} 秒)")
            }
            ValidationOutcome::Failure { kind, message, .. } => format!("[{kind}] {message}"),
        }
    }

    fn failure_message(&self, err: &ValidationError) -> String {
        let ValidationError::MissingAutoInjection { missing, elapsed } = err else {
            return err.to_string();
        };

        let mut message = format!(
            "({:.2} 秒)\n以下节点声明了可注入成员，但未登记在任何作用域的自动注入列表中:\n",
            elapsed.as_secs_f64()
        );
        let listed = self.max_listed.unwrap_or(missing.len()).min(missing.len());
        let entries: Vec<String> = missing[..listed]
            .iter()
            .enumerate()
            .map(|(index, node)| format!("[{}] {}\n路径: {}", index + 1, node.name, node.path))
            .collect();
        message.push_str(&entries.join("\n\n"));

        if listed < missing.len() {
            let _ = write!(message, "\n\n... 以及另外 {} 个节点", missing.len() - listed);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::NodeId;

    fn missing(count: u64) -> ValidationError {
        ValidationError::MissingAutoInjection {
            missing: (1..=count)
                .map(|id| UncoveredNode {
                    node: NodeId(id),
                    name: format!("Node{id}"),
                    path: format!("Root/Node{id}"),
                })
                .collect(),
            elapsed: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_success_outcome() {
        let reporter = ValidationReporter::default();
        let result = Ok(RunSummary::new(2, 5, Duration::from_millis(500)));

        let outcome = reporter.outcome(&result);
        assert!(outcome.is_success());
        assert_eq!(outcome.elapsed_seconds(), 0.5);
        assert!(reporter.render(&outcome).contains("0.50"));

        let report = reporter.report(&result);
        assert_eq!(report.summary.unwrap().scopes_built, 2);
    }

    #[test]
    fn test_missing_injection_lists_every_node_with_path() {
        let reporter = ValidationReporter::default();
        let outcome = reporter.outcome(&Err(missing(2)));

        let ValidationOutcome::Failure {
            kind,
            message,
            uncovered,
            ..
        } = &outcome
        else {
            panic!("expected failure");
        };
        assert_eq!(*kind, FailureKind::MissingAutoInjection);
        assert_eq!(uncovered.len(), 2);
        assert!(message.contains("[1] Node1\n路径: Root/Node1\n\n[2] Node2"));
    }

    #[test]
    fn test_listing_can_be_truncated() {
        let reporter = ValidationReporter::new(Some(1));
        let outcome = reporter.outcome(&Err(missing(3)));

        let ValidationOutcome::Failure {
            message, uncovered, ..
        } = &outcome
        else {
            panic!("expected failure");
        };
        assert!(message.contains("[1] Node1"));
        assert!(!message.contains("[2] Node2"));
        assert!(message.contains("另外 2 个节点"));
        assert_eq!(uncovered.len(), 3);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let reporter = ValidationReporter::default();
        let outcome = reporter.outcome(&Err(ValidationError::NoScopesFound {
            elapsed: Duration::from_secs(1),
        }));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "NoScopesFound");
        assert!(json.get("uncovered").is_none());
    }
}
