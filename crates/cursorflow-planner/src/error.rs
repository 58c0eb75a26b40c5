use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid expression '{expr}': {reason}")]
    Expr { expr: String, reason: String },

    #[error("invalid source: {0}")]
    Source(String),
}

impl PlanError {
    pub(crate) fn expr(expr: &str, reason: impl Into<String>) -> Self {
        PlanError::Expr {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
