//! 领域层统一错误定义
//!
//! 聚焦校验、查找与存储约束三类最小必要错误，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 校验 ---
    #[error("validation failed: field={field}, reason={reason}")]
    Validation { field: String, reason: String },
    #[error("invalid identifier: {value:?}")]
    InvalidIdentifier { value: String },

    // --- 查找 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },

    // --- 存储约束（唯一性/引用完整性）---
    #[error("constraint violation: constraint={constraint}, reason={reason}")]
    ConstraintViolation { constraint: String, reason: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        DomainError::NotFound {
            reason: reason.into(),
        }
    }

    pub fn constraint(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::ConstraintViolation {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    /// 非法标识符同样归入校验错误
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. } | DomainError::InvalidIdentifier { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DomainError::ConstraintViolation { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
