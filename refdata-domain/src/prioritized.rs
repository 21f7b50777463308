//! 优先级记录（Prioritized Record）
//!
use crate::entity::Entity;
use crate::error::DomainResult;
use crate::value_object::{Priority, ValueObject};
use serde::{Deserialize, Serialize};

/// 优先级字段集（默认 0）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritizedFields {
    pub priority: Priority,
}

impl PrioritizedFields {
    pub fn new(priority: u16) -> Self {
        Self {
            priority: Priority::new(priority),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.priority.validate()
    }
}

pub trait Prioritized: Entity {
    fn prioritized(&self) -> &PrioritizedFields;

    fn prioritized_mut(&mut self) -> &mut PrioritizedFields;

    fn priority(&self) -> Priority {
        self.prioritized().priority
    }
}
