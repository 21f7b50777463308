//! 基于内存的仓储实现
//!
//! - 行以 `DashMap` 分片存储，更新期间持有行写锁，版本以已存储行为基准递增；
//! - 名称与 uuid 唯一性通过索引项原子占位保证，加锁顺序固定为先行后索引；
//! - 引用计数委托给 [`Directory`]，删除仍被引用的记录会失败。
//!
use crate::entity::{Entity, RecordId, Reference};
use crate::error::{DomainError, DomainResult};
use crate::named::{NameRule, Named};
use crate::persist::{Directory, NamedRepository, Repository};
use crate::versioned::SaveOptions;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;
use uuid::Uuid;

pub struct InMemoryRepository<E>
where
    E: Entity,
{
    rows: DashMap<RecordId, E>,
    names: DashMap<String, RecordId>,
    uuids: DashMap<Uuid, RecordId>,
    next_id: AtomicI64,
    directory: Arc<Directory>,
}

impl<E> InMemoryRepository<E>
where
    E: Entity,
{
    pub fn new(directory: Arc<Directory>) -> Self {
        Self {
            rows: DashMap::new(),
            names: DashMap::new(),
            uuids: DashMap::new(),
            next_id: AtomicI64::new(1),
            directory,
        }
    }

    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    // 新行的分片写锁先于名称索引取得：按名查到的 id 必定能读到已写入的行
    fn insert(&self, candidate: &mut E) -> DomainResult<Vec<Reference>> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        candidate.versioned_mut().stamp_created(id, Utc::now());

        let slot = match self.rows.entry(id) {
            Entry::Vacant(slot) => slot,
            Entry::Occupied(_) => {
                return Err(DomainError::constraint(
                    "primary_key",
                    format!("record id {id} is already in use"),
                ));
            }
        };

        let name = candidate.unique_name().map(str::to_owned);
        if let Some(name) = &name {
            reserve(&self.names, name.clone(), id, "unique_name")?;
        }
        let uuid = candidate.versioned().uuid();
        if let Err(err) = reserve(&self.uuids, uuid, id, "unique_uuid") {
            if let Some(name) = &name {
                free(&self.names, name, id);
            }
            return Err(err);
        }

        slot.insert(candidate.clone());
        self.directory.register(Reference::Record {
            table: E::TYPE_NAME,
            id,
        });
        debug!(type_name = E::TYPE_NAME, %id, "record created");
        Ok(Vec::new())
    }

    // 返回旧行持有、需要释放的引用
    fn update(&self, id: RecordId, candidate: &mut E) -> DomainResult<Vec<Reference>> {
        let mut row = self.rows.get_mut(&id).ok_or_else(|| {
            DomainError::not_found(format!("{} with id {id} does not exist", E::TYPE_NAME))
        })?;

        let stored = row.value();
        if stored.versioned().uuid() != candidate.versioned().uuid() {
            return Err(DomainError::validation("uuid", "uuid is immutable"));
        }

        let old_name = stored.unique_name().map(str::to_owned);
        let new_name = candidate.unique_name().map(str::to_owned);
        let renamed = old_name != new_name;
        if renamed {
            if let Some(name) = &new_name {
                reserve(&self.names, name.clone(), id, "unique_name")?;
            }
        }

        candidate
            .versioned_mut()
            .stamp_updated(stored.versioned(), Utc::now());
        let released = stored.references();
        *row = candidate.clone();

        // 旧名称在行写锁内释放，并发改名不会丢失索引项
        if let (true, Some(name)) = (renamed, &old_name) {
            free(&self.names, name, id);
        }
        drop(row);

        debug!(
            type_name = E::TYPE_NAME,
            %id,
            version = %candidate.version(),
            "record updated"
        );
        Ok(released)
    }
}

fn reserve<K>(
    index: &DashMap<K, RecordId>,
    key: K,
    id: RecordId,
    constraint: &str,
) -> DomainResult<()>
where
    K: Eq + Hash + std::fmt::Debug,
{
    match index.entry(key) {
        Entry::Occupied(entry) if *entry.get() != id => Err(DomainError::constraint(
            constraint,
            format!("{:?} is already used by record {}", entry.key(), entry.get()),
        )),
        Entry::Occupied(_) => Ok(()),
        Entry::Vacant(entry) => {
            entry.insert(id);
            Ok(())
        }
    }
}

fn free<K, Q>(index: &DashMap<K, RecordId>, key: &Q, id: RecordId)
where
    K: Eq + Hash + std::borrow::Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    index.remove_if(key, |_, owner| *owner == id);
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity,
{
    fn save(&self, entity: &mut E, options: SaveOptions) -> DomainResult<()> {
        let mut candidate = entity.clone();
        candidate.versioned_mut().apply_options(&options);

        // 写入前完成校验
        candidate.versioned().validate_attribution()?;
        candidate.validate()?;

        let references = candidate.references();
        self.directory.retain(&references)?;

        let result = match candidate.id() {
            None => self.insert(&mut candidate),
            Some(id) => self.update(id, &mut candidate),
        };

        match result {
            Ok(released) => {
                self.directory.release(&released);
                *entity = candidate;
                Ok(())
            }
            Err(err) => {
                self.directory.release(&references);
                Err(err)
            }
        }
    }

    fn get_or_none(&self, id: RecordId) -> DomainResult<Option<E>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<E>> {
        let id = self.uuids.get(&uuid).map(|entry| *entry.value());
        match id {
            Some(id) => self.get_or_none(id),
            None => Ok(None),
        }
    }

    fn list(&self) -> DomainResult<Vec<E>> {
        let mut rows: Vec<E> = self.rows.iter().map(|row| row.value().clone()).collect();
        rows.sort_by(|a, b| a.ordering(b));
        Ok(rows)
    }

    fn delete(&self, id: RecordId) -> DomainResult<E> {
        if !self.rows.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "{} with id {id} does not exist",
                E::TYPE_NAME
            )));
        }

        // 被其他记录引用时拒绝删除
        self.directory.unregister(&Reference::Record {
            table: E::TYPE_NAME,
            id,
        })?;

        let (_, removed) = self.rows.remove(&id).ok_or_else(|| {
            DomainError::not_found(format!("{} with id {id} does not exist", E::TYPE_NAME))
        })?;
        if let Some(name) = removed.unique_name() {
            free(&self.names, name, id);
        }
        free(&self.uuids, &removed.versioned().uuid(), id);
        self.directory.release(&removed.references());

        debug!(type_name = E::TYPE_NAME, %id, "record deleted");
        Ok(removed)
    }

    fn count(&self) -> DomainResult<usize> {
        Ok(self.rows.len())
    }
}

impl<E> NamedRepository<E> for InMemoryRepository<E>
where
    E: Named,
{
    fn get_by_name(&self, name: &str) -> DomainResult<Option<E>> {
        let id = self.names.get(name).map(|entry| *entry.value());
        if let Some(id) = id {
            // 读取索引后该行可能已被改名
            return Ok(self
                .get_or_none(id)?
                .filter(|row| row.unique_name() == Some(name)));
        }
        if E::NAME_RULE == NameRule::Required {
            return Ok(None);
        }

        // 可选名称不建唯一索引，按默认排序取第一条
        Ok(self
            .rows
            .iter()
            .filter(|row| row.value().naming().name() == Some(name))
            .map(|row| row.value().clone())
            .min_by(|a, b| a.ordering(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{SiteId, UserId};
    use crate::named::NamingFields;
    use crate::versioned::VersionedFields;
    use crate::versioned;

    #[versioned(named)]
    struct Gender {}

    fn repository() -> InMemoryRepository<Gender> {
        let directory = Arc::new(Directory::new());
        directory.register_user(UserId::new(1));
        directory.register_site(SiteId::new(1));
        InMemoryRepository::new(directory)
    }

    fn gender(name: &str) -> Gender {
        Gender {
            versioned: VersionedFields::attributed(UserId::new(1), SiteId::new(1)),
            naming: NamingFields::new(name),
        }
    }

    #[test]
    fn indexed_name_always_resolves_to_row() {
        let repo = repository();
        let names: Vec<String> = (0..200).map(|i| format!("g{i}")).collect();

        std::thread::scope(|s| {
            s.spawn(|| {
                for name in &names {
                    repo.save(&mut gender(name), SaveOptions::default()).unwrap();
                }
            });
            s.spawn(|| {
                for name in &names {
                    while !repo.names.contains_key(name) {
                        std::thread::yield_now();
                    }
                    let found = repo.get_by_name(name).unwrap();
                    assert_eq!(found.and_then(|g| g.naming.name), Some(name.clone()));
                }
            });
        });
        assert_eq!(repo.count().unwrap(), names.len());
    }

    #[test]
    fn concurrent_renames_keep_index_consistent() {
        let repo = repository();
        let mut record = gender("Alpha");
        repo.save(&mut record, SaveOptions::default()).unwrap();
        let id = record.id().unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for i in 0..50 {
                        let mut current = repo.get(id).unwrap();
                        let next = if i % 2 == 0 { "Beta" } else { "Alpha" };
                        current.naming = NamingFields::new(next);
                        repo.save(&mut current, SaveOptions::default()).unwrap();
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..200 {
                    for name in ["Alpha", "Beta"] {
                        if let Some(found) = repo.get_by_name(name).unwrap() {
                            assert_eq!(found.naming.name(), Some(name));
                        }
                    }
                }
            });
        });

        let stored = repo.get(id).unwrap();
        let current = stored.naming.name().unwrap();
        assert_eq!(repo.get_by_name(current).unwrap().map(|g| g.id()), Some(Some(id)));
        assert_eq!(repo.names.len(), 1);
        assert_eq!(stored.version().value(), 201);
    }
}
