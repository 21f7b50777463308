use refdata_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("admin already registered: {admin}")]
    AlreadyRegistered { admin: String },

    #[error("config: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied(reason.into())
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// 领域错误（若是）
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_domain_errors() {
        let err: AppError = DomainError::not_found("Country with id 1 does not exist").into();
        assert!(err.as_domain().is_some_and(DomainError::is_not_found));
        assert_eq!(
            err.to_string(),
            "domain: not found: Country with id 1 does not exist"
        );
        assert!(AppError::permission_denied("x").is_permission_denied());
    }
}
