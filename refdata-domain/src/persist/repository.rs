//! 仓储协议
//!
//! 存储协作方需提供：按键增删改查、唯一/外键约束与单行原子写入。
//!
use crate::entity::{Entity, RecordId};
use crate::error::{DomainError, DomainResult};
use crate::named::{Named, UNKNOWN};
use crate::versioned::SaveOptions;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

pub trait Repository<E>: Send + Sync
where
    E: Entity,
{
    /// 持久化（创建或更新）；成功后将存储结果回写到 `entity`
    fn save(&self, entity: &mut E, options: SaveOptions) -> DomainResult<()>;

    fn get_or_none(&self, id: RecordId) -> DomainResult<Option<E>>;

    fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<E>>;

    /// 按实体默认排序返回全部记录
    fn list(&self) -> DomainResult<Vec<E>>;

    /// 物理删除；仍被引用时失败
    fn delete(&self, id: RecordId) -> DomainResult<E>;

    fn count(&self) -> DomainResult<usize>;

    fn get(&self, id: RecordId) -> DomainResult<E> {
        self.get_or_none(id)?.ok_or_else(|| {
            DomainError::not_found(format!("{} with id {id} does not exist", E::TYPE_NAME))
        })
    }

    /// 按 `update_time` 取最新一条
    fn latest(&self) -> DomainResult<Option<E>> {
        Ok(self
            .list()?
            .into_iter()
            .max_by_key(|e| e.versioned().update_time()))
    }
}

/// 命名记录仓储：按名称查找并回退到哨兵记录
pub trait NamedRepository<E>: Repository<E>
where
    E: Named,
{
    /// 精确查找
    fn get_by_name(&self, name: &str) -> DomainResult<Option<E>>;

    /// 查找命名记录；不存在时回退到 `UNKNOWN`，哨兵也缺失则 `NotFound`
    fn find_by_name(&self, name: &str) -> DomainResult<E> {
        if let Some(found) = self.get_by_name(name)? {
            return Ok(found);
        }

        warn!(
            type_name = E::TYPE_NAME,
            name, "failed to retrieve named instance, falling back to {UNKNOWN}"
        );

        self.get_by_name(UNKNOWN)?.ok_or_else(|| {
            DomainError::not_found(format!(
                "{} named {name:?} does not exist and no {UNKNOWN} record is seeded",
                E::TYPE_NAME
            ))
        })
    }
}

impl<E, T> Repository<E> for Arc<T>
where
    E: Entity,
    T: Repository<E> + ?Sized,
{
    fn save(&self, entity: &mut E, options: SaveOptions) -> DomainResult<()> {
        (**self).save(entity, options)
    }

    fn get_or_none(&self, id: RecordId) -> DomainResult<Option<E>> {
        (**self).get_or_none(id)
    }

    fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<E>> {
        (**self).find_by_uuid(uuid)
    }

    fn list(&self) -> DomainResult<Vec<E>> {
        (**self).list()
    }

    fn delete(&self, id: RecordId) -> DomainResult<E> {
        (**self).delete(id)
    }

    fn count(&self) -> DomainResult<usize> {
        (**self).count()
    }
}

impl<E, T> NamedRepository<E> for Arc<T>
where
    E: Named,
    T: NamedRepository<E> + ?Sized,
{
    fn get_by_name(&self, name: &str) -> DomainResult<Option<E>> {
        (**self).get_by_name(name)
    }
}
