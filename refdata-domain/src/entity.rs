//! 实体（Entity）基础抽象
//!
//! 为版本化记录提供统一的标识、版本、校验与排序能力。
//! 具体字段集合由 [`VersionedFields`] 等结构组合而成，
//! 一般通过 `#[versioned]` 宏自动实现本 trait。
//!
use crate::error::DomainResult;
use crate::schema::{self, ColumnSpec};
use crate::value_object::Version;
use crate::versioned::VersionedFields;
use refdata_macros::entity_id;
use std::cmp::Ordering;

/// 记录主键（由存储在首次持久化时分配）
#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct RecordId(i64);

/// 用户标识（身份协作方提供的不透明外键）
#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct UserId(i64);

/// 站点/命名空间标识
#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct SiteId(i64);

/// 可被其他记录引用的目标，用于限制性删除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reference {
    User(UserId),
    Site(SiteId),
    Record { table: &'static str, id: RecordId },
}

/// 具备版本化字段集的实体
pub trait Entity: Clone + Send + Sync + 'static {
    /// 稳定的类型名（用于命名约定与日志）
    const TYPE_NAME: &'static str;

    fn versioned(&self) -> &VersionedFields;

    fn versioned_mut(&mut self) -> &mut VersionedFields;

    fn id(&self) -> Option<RecordId> {
        self.versioned().id()
    }

    fn version(&self) -> Version {
        self.versioned().version()
    }

    /// 实体自身的约束校验（不含审计字段）
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }

    /// 表内唯一的名称（仅必填命名记录返回）
    fn unique_name(&self) -> Option<&str> {
        None
    }

    /// 指向其他记录的外键
    fn foreign_keys(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// 默认列表排序，按主键
    fn ordering(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }

    /// 展示文本：`{TypeName} object {id} {uuid} {version}`
    fn display_name(&self) -> String {
        let v = self.versioned();
        let id = v.id().map_or_else(|| "None".to_string(), |id| id.to_string());
        format!(
            "{} object {} {} {}",
            Self::TYPE_NAME,
            id,
            v.uuid(),
            v.version()
        )
    }

    /// 共享字段集对应的列描述
    fn base_columns() -> Vec<ColumnSpec> {
        schema::versioned_columns()
    }

    /// 本记录持有的全部引用：审计用户、站点与外键
    fn references(&self) -> Vec<Reference> {
        let mut refs = self.versioned().attribution_references();
        refs.extend(self.foreign_keys());
        refs.sort();
        refs.dedup();
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Plain {
        versioned: VersionedFields,
    }

    impl Entity for Plain {
        const TYPE_NAME: &'static str = "MyModel";

        fn versioned(&self) -> &VersionedFields {
            &self.versioned
        }

        fn versioned_mut(&mut self) -> &mut VersionedFields {
            &mut self.versioned
        }
    }

    #[test]
    fn display_name_of_unpersisted_record() {
        let plain = Plain::default();
        let text = plain.display_name();
        assert!(text.starts_with("MyModel object None"), "{text}");
        assert!(text.ends_with(" 0"));
    }

    #[test]
    fn references_are_deduplicated() {
        let mut plain = Plain::default();
        let user = UserId::new(1);
        plain.versioned.creation_user = Some(user);
        plain.versioned.update_user = Some(user);
        plain.versioned.effective_user = Some(UserId::new(2));
        plain.versioned.site = Some(SiteId::new(9));

        let refs = plain.references();
        assert_eq!(
            refs,
            vec![
                Reference::User(UserId::new(1)),
                Reference::User(UserId::new(2)),
                Reference::Site(SiteId::new(9)),
            ]
        );
    }

    #[test]
    fn ids_parse_and_display() {
        let id: RecordId = "42".parse().unwrap();
        assert_eq!(id, RecordId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(serde_json::to_string(&UserId::new(3)).unwrap(), "3");
    }
}
