use funcgen_model::ast::Span;
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// A diagnostic message from the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// Human-readable message
    pub message: String,

    /// Source location the message is bound to, when one exists
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
            span: Some(span),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
            span: None,
        }
    }
}
