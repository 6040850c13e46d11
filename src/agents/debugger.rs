//! Debugging agent
//!
//! Deterministic line-level lint checks plus root-cause analysis of a
//! recorded runtime error. The sandbox that produces runtime output is a
//! separate service; this agent only consumes its captured stderr, so the
//! whole analysis stays reproducible.

use super::{Agent, AgentKind, AgentRequest, AgentResponse};
use crate::analysis::Severity;
use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static VAR_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvar\s+\w+").expect("valid var regex"));

static JS_ERROR_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+Error): (.+)$").expect("valid error-head regex"));

static JS_STACK_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"at\s+(?:(.+?)\s+\()?(.+?):(\d+):(\d+)\)?").expect("valid stack-frame regex")
});

static PY_ERROR_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+): (.+)$").expect("valid py-error regex"));

static PY_STACK_FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"File "(.+)", line (\d+)"#).expect("valid py-frame regex"));

static UNDEFINED_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+) is not defined").expect("valid undefined-var regex"));

static NOT_A_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+) is not a function").expect("valid not-a-function regex"));

static PROPERTY_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\.(\w+)").expect("valid property regex"));

/// Kind of a single debug finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

/// One finding at a specific source location
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugIssue {
    pub line: usize,
    pub column: usize,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Parsed stack frame from recorded runtime output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub function: String,
}

/// Parsed stack trace
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTrace {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub stack: Vec<StackFrame>,
}

/// Explanation of why the recorded error happened
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCauseAnalysis {
    pub error_type: String,
    pub explanation: String,
    pub root_cause: String,
    pub suggested_fix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patched_code: Option<String>,
    pub confidence: f64,
}

/// Combined debugging report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub issues: Vec<DebugIssue>,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

#[derive(Default)]
pub struct DebuggerAgent;

impl DebuggerAgent {
    pub fn new() -> Self {
        Self
    }

    /// Line-by-line lint scan for common JavaScript pitfalls
    pub fn static_analysis(code: &str) -> Vec<DebugIssue> {
        let lines: Vec<&str> = code.split('\n').collect();
        let mut issues = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line_num = index + 1;

            if let Some(column) = line.find("console.log") {
                issues.push(DebugIssue {
                    line: line_num,
                    column,
                    message: "Console.log statement found".to_string(),
                    kind: IssueKind::Warning,
                    suggestion: Some(
                        "Remove console.log or use a proper logging library".to_string(),
                    ),
                });
            }

            if VAR_DECL.is_match(line) {
                issues.push(DebugIssue {
                    line: line_num,
                    column: line.find("var").unwrap_or(0),
                    message: "Using \"var\" instead of \"let\" or \"const\"".to_string(),
                    kind: IssueKind::Warning,
                    suggestion: Some(
                        "Use \"let\" or \"const\" instead of \"var\" for better scoping"
                            .to_string(),
                    ),
                });
            }

            if line.contains("==") && !line.contains("===") {
                issues.push(DebugIssue {
                    line: line_num,
                    column: line.find("==").unwrap_or(0),
                    message: "Using loose equality (==) instead of strict equality (===)"
                        .to_string(),
                    kind: IssueKind::Warning,
                    suggestion: Some("Use === for strict equality comparison".to_string()),
                });
            }

            let trimmed = line.trim();
            if !trimmed.is_empty()
                && !trimmed.ends_with(';')
                && !trimmed.ends_with('{')
                && !trimmed.ends_with('}')
                && !trimmed.starts_with("//")
                && (trimmed.starts_with("const ")
                    || trimmed.starts_with("let ")
                    || trimmed.starts_with("var ")
                    || trimmed.contains("return "))
            {
                issues.push(DebugIssue {
                    line: line_num,
                    column: line.len(),
                    message: "Missing semicolon".to_string(),
                    kind: IssueKind::Info,
                    suggestion: Some("Add semicolon at end of statement".to_string()),
                });
            }

            if line.contains("catch")
                && lines.get(index + 1).map(|l| l.trim()) == Some("}")
            {
                issues.push(DebugIssue {
                    line: line_num,
                    column: 0,
                    message: "Empty catch block".to_string(),
                    kind: IssueKind::Warning,
                    suggestion: Some("Handle the error or at least log it".to_string()),
                });
            }
        }

        issues
    }

    /// Parse a recorded stack trace in Node or Python format
    pub fn parse_stack_trace(error_output: &str, language: &str) -> StackTrace {
        let lines: Vec<&str> = error_output.split('\n').collect();
        let mut stack = Vec::new();
        let mut message = String::new();
        let mut error_type = "Error".to_string();

        if language == "javascript" || language == "typescript" {
            if let Some(first) = lines.first() {
                if let Some(captures) = JS_ERROR_HEAD.captures(first) {
                    error_type = captures[1].to_string();
                    message = captures[2].to_string();
                } else {
                    message = first.to_string();
                }
            }

            for line in lines.iter().skip(1) {
                if let Some(captures) = JS_STACK_FRAME.captures(line) {
                    stack.push(StackFrame {
                        function: captures
                            .get(1)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_else(|| "anonymous".to_string()),
                        file: captures[2].to_string(),
                        line: captures[3].parse().unwrap_or(0),
                        column: captures[4].parse().unwrap_or(0),
                    });
                }
            }
        } else if language == "python" {
            if let Some(last) = lines.iter().rev().find(|l| !l.trim().is_empty())
                && let Some(captures) = PY_ERROR_HEAD.captures(last)
            {
                error_type = captures[1].to_string();
                message = captures[2].to_string();
            }

            for (index, line) in lines.iter().enumerate() {
                if let Some(captures) = PY_STACK_FRAME.captures(line) {
                    stack.push(StackFrame {
                        file: captures[1].to_string(),
                        line: captures[2].parse().unwrap_or(0),
                        column: 0,
                        function: lines
                            .get(index + 1)
                            .map(|l| l.trim().to_string())
                            .unwrap_or_else(|| "unknown".to_string()),
                    });
                }
            }
        }

        StackTrace {
            message,
            error_type,
            stack,
        }
    }

    /// Map an error type and message onto a known failure pattern
    pub fn analyze_root_cause(_code: &str, trace: &StackTrace) -> RootCauseAnalysis {
        let error_type = trace.error_type.as_str();
        let message = trace.message.as_str();

        let (explanation, root_cause, suggested_fix, confidence) = match error_type {
            "ReferenceError" => {
                let var_name = UNDEFINED_VAR
                    .captures(message)
                    .map(|c| c[1].to_string())
                    .unwrap_or_else(|| "variable".to_string());
                (
                    format!(
                        "You're trying to use \"{var_name}\" but it hasn't been declared yet. \
                         Think of it like trying to use a tool that doesn't exist in your toolbox."
                    ),
                    format!(
                        "The variable \"{var_name}\" is being used before it's defined, \
                         or it was never defined at all."
                    ),
                    format!(
                        "Add \"let {var_name} = ...\" or \"const {var_name} = ...\" before \
                         using it, or check for typos in the variable name."
                    ),
                    0.9,
                )
            }
            "TypeError" if message.contains("is not a function") => {
                let item = NOT_A_FUNCTION
                    .captures(message)
                    .map(|c| c[1].to_string())
                    .unwrap_or_else(|| "something".to_string());
                (
                    format!(
                        "You're trying to call \"{item}\" as a function, but it's not actually \
                         a function. It's like trying to drive a bicycle - bicycles aren't cars!"
                    ),
                    format!(
                        "\"{item}\" is not a function. It might be undefined, null, or a \
                         different data type."
                    ),
                    format!(
                        "Check that \"{item}\" is actually a function. Add a check like \
                         \"if (typeof {item} === 'function')\" or verify the function is \
                         properly imported/defined."
                    ),
                    0.85,
                )
            }
            "TypeError"
                if message.contains("Cannot read property")
                    || message.contains("Cannot read properties of") =>
            {
                (
                    "You're trying to access a property on something that's null or undefined. \
                     It's like trying to open a door on a house that doesn't exist."
                        .to_string(),
                    "Attempting to access a property on null or undefined value.".to_string(),
                    "Add a null check before accessing the property: \"if (obj && obj.property)\" \
                     or use optional chaining: \"obj?.property\""
                        .to_string(),
                    0.9,
                )
            }
            "SyntaxError" if message.contains("Unexpected token") => (
                "There's a typo or incorrect syntax in your code. The parser found something \
                 it didn't expect, like a missing comma or bracket."
                    .to_string(),
                "Invalid syntax - missing or extra punctuation, brackets, or keywords."
                    .to_string(),
                "Check for missing/extra brackets, commas, semicolons, or quotes. Use a linter \
                 or IDE to highlight syntax errors."
                    .to_string(),
                0.7,
            ),
            "RangeError" if message.contains("Maximum call stack size exceeded") => (
                "Your code is stuck in infinite recursion - a function keeps calling itself \
                 forever until the program runs out of memory. It's like standing between two \
                 mirrors that reflect each other infinitely."
                    .to_string(),
                "Infinite recursion detected. A function is calling itself without a proper \
                 exit condition."
                    .to_string(),
                "Add a base case to stop the recursion, or check if you accidentally created \
                 an infinite loop."
                    .to_string(),
                0.95,
            ),
            _ => (
                format!(
                    "An error occurred: {message}. This means something unexpected happened \
                     during execution."
                ),
                format!("{error_type}: {message}"),
                "Review the error message and stack trace to identify the problematic line. \
                 Check the documentation for the functions you're using."
                    .to_string(),
                0.5,
            ),
        };

        RootCauseAnalysis {
            error_type: error_type.to_string(),
            explanation,
            root_cause,
            suggested_fix,
            patched_code: None,
            confidence,
        }
    }

    /// Produce a mechanically patched version of the code
    pub fn generate_patch(original_code: &str, analysis: &RootCauseAnalysis) -> String {
        if analysis.error_type == "ReferenceError" {
            static DECLARED_VAR: LazyLock<Regex> = LazyLock::new(|| {
                Regex::new(r#"variable "(\w+)""#).expect("valid declared-var regex")
            });
            if let Some(captures) = DECLARED_VAR.captures(&analysis.root_cause) {
                return format!("let {};\n{}", &captures[1], original_code);
            }
        }

        if analysis.error_type == "TypeError" && analysis.root_cause.contains("null or undefined")
        {
            return PROPERTY_ACCESS
                .replace_all(original_code, "$1?.$2")
                .to_string();
        }

        original_code.to_string()
    }

    fn calculate_severity(issues: &[DebugIssue]) -> Severity {
        let errors = issues.iter().filter(|i| i.kind == IssueKind::Error).count();
        let warnings = issues
            .iter()
            .filter(|i| i.kind == IssueKind::Warning)
            .count();

        if errors > 0 {
            Severity::Critical
        } else if warnings > 5 {
            Severity::High
        } else if warnings > 2 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

#[async_trait::async_trait]
impl Agent for DebuggerAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Debugger
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let language = request.language.as_deref().unwrap_or("javascript");
        let mut issues = Self::static_analysis(&request.code);

        let mut root_cause = None;
        if let Some(error_output) = &request.options.runtime_error
            && !error_output.trim().is_empty()
        {
            let trace = Self::parse_stack_trace(error_output, language);
            let mut analysis = Self::analyze_root_cause(&request.code, &trace);

            if request.options.auto_fix && analysis.confidence > 0.7 {
                analysis.patched_code = Some(Self::generate_patch(&request.code, &analysis));
            }

            issues.push(DebugIssue {
                line: trace.stack.first().map(|f| f.line).unwrap_or(1),
                column: trace.stack.first().map(|f| f.column).unwrap_or(0),
                message: format!("Runtime Error: {}", trace.message),
                kind: IssueKind::Error,
                suggestion: Some(analysis.suggested_fix.clone()),
            });

            root_cause = Some(analysis);
        }

        let report = DebugReport {
            severity: Self::calculate_severity(&issues),
            timestamp: Utc::now(),
            issues,
        };

        let errors: Vec<String> = report
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::Error)
            .map(|i| i.message.clone())
            .collect();

        let static_issues: Vec<DebugIssue> = report
            .issues
            .iter()
            .filter(|i| i.kind != IssueKind::Error)
            .cloned()
            .collect();

        let data = serde_json::json!({
            "report": report,
            "rootCauseAnalysis": root_cause,
            "staticAnalysis": static_issues,
        });

        Ok(AgentResponse::new(AgentKind::Debugger, data).with_errors(errors))
    }
}
