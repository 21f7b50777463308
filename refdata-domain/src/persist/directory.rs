//! 引用目录
//!
//! 登记可被引用的用户、站点与记录，并维护引用计数：
//! - 保存记录前，其引用的目标必须已登记；
//! - 仍被引用的目标不可移除（限制性删除）。
//!
use crate::entity::{Reference, SiteId, UserId};
use crate::error::{DomainError, DomainResult};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

/// 键存在即已登记，值为当前引用数
#[derive(Debug, Default)]
pub struct Directory {
    entries: DashMap<Reference, usize>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, reference: Reference) {
        self.entries.entry(reference).or_insert(0);
    }

    pub fn register_user(&self, user: UserId) {
        self.register(Reference::User(user));
    }

    pub fn register_site(&self, site: SiteId) {
        self.register(Reference::Site(site));
    }

    pub fn contains(&self, reference: &Reference) -> bool {
        self.entries.contains_key(reference)
    }

    pub fn reference_count(&self, reference: &Reference) -> usize {
        self.entries.get(reference).map_or(0, |count| *count)
    }

    /// 移除目标；仍被引用时拒绝
    pub fn unregister(&self, reference: &Reference) -> DomainResult<()> {
        match self.entries.entry(*reference) {
            Entry::Occupied(entry) if *entry.get() > 0 => Err(DomainError::constraint(
                "protected_reference",
                format!(
                    "{reference:?} is still referenced by {} record(s)",
                    entry.get()
                ),
            )),
            Entry::Occupied(entry) => {
                entry.remove();
                debug!(?reference, "reference unregistered");
                Ok(())
            }
            Entry::Vacant(_) => Err(DomainError::not_found(format!(
                "{reference:?} is not registered"
            ))),
        }
    }

    pub fn remove_user(&self, user: UserId) -> DomainResult<()> {
        self.unregister(&Reference::User(user))
    }

    pub fn remove_site(&self, site: SiteId) -> DomainResult<()> {
        self.unregister(&Reference::Site(site))
    }

    /// 为每个目标增加引用；任一目标未登记则回滚并报错
    pub(crate) fn retain(&self, references: &[Reference]) -> DomainResult<()> {
        for (i, reference) in references.iter().enumerate() {
            match self.entries.get_mut(reference) {
                Some(mut count) => *count += 1,
                None => {
                    self.release(&references[..i]);
                    return Err(DomainError::constraint(
                        "foreign_key",
                        format!("{reference:?} does not exist"),
                    ));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn release(&self, references: &[Reference]) {
        for reference in references {
            if let Some(mut count) = self.entries.get_mut(reference) {
                *count = count.saturating_sub(1);
            }
        }
    }
}
