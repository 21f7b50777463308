//! 命名记录（Named Record）
//!
//! 用于国家、语言、性别等静态参考数据：名称（必填且表内唯一，或可选）、
//! 别名与描述。展示名优先取非空别名，否则取名称。
//!
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// 名称查找失败时回退的哨兵记录名
pub const UNKNOWN: &str = "UNKNOWN";

/// 名称/别名的最大长度
pub const NAME_MAX_LENGTH: usize = 255;

/// 名称约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// 必填且表内唯一
    Required,
    /// 可为空且不要求唯一
    Optional,
}

/// 命名字段集
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingFields {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub description: Option<String>,
}

impl NamingFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// 非空别名优先，否则为名称；两者皆缺时为空串
    pub fn display_name(&self) -> &str {
        match self.alias() {
            Some(alias) if !alias.is_empty() => alias,
            _ => self.name().unwrap_or_default(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name() == Some(UNKNOWN)
    }

    pub fn validate(&self, rule: NameRule) -> DomainResult<()> {
        match (rule, self.name()) {
            (NameRule::Required, None) => {
                return Err(DomainError::validation("name", "this field is required"));
            }
            (NameRule::Required, Some(name)) if name.trim().is_empty() => {
                return Err(DomainError::validation("name", "this field may not be blank"));
            }
            _ => {}
        }

        for (field, value) in [("name", self.name()), ("alias", self.alias())] {
            if value.is_some_and(|v| v.chars().count() > NAME_MAX_LENGTH) {
                return Err(DomainError::validation(
                    field,
                    format!("ensure this value has at most {NAME_MAX_LENGTH} characters"),
                ));
            }
        }
        Ok(())
    }
}

/// 具备命名字段集的实体
pub trait Named: Entity {
    const NAME_RULE: NameRule;

    fn naming(&self) -> &NamingFields;

    fn naming_mut(&mut self) -> &mut NamingFields;
}
