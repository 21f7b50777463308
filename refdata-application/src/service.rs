//! 记录服务：列表 / 创建 / 读取 / 部分更新 / 删除
//!
use crate::context::AppContext;
use crate::dto::Fields;
use crate::error::AppResult;
use crate::permission::{Access, IsCreatorOrReadOnly, Permission};
use crate::serializer::RecordSerializer;
use refdata_domain::entity::{Entity, RecordId};
use refdata_domain::persist::Repository;
use refdata_domain::versioned::SaveOptions;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

pub struct RecordService<E, R, P = IsCreatorOrReadOnly>
where
    E: Entity,
    R: Repository<E>,
    P: Permission<E>,
{
    repository: R,
    permission: P,
    serializer: RecordSerializer<E>,
}

impl<E, R> RecordService<E, R>
where
    E: Entity + Serialize + DeserializeOwned,
    R: Repository<E>,
{
    pub fn new(repository: R) -> Self {
        Self::with_permission(repository, IsCreatorOrReadOnly)
    }
}

impl<E, R, P> RecordService<E, R, P>
where
    E: Entity + Serialize + DeserializeOwned,
    R: Repository<E>,
    P: Permission<E>,
{
    pub fn with_permission(repository: R, permission: P) -> Self {
        Self {
            repository,
            permission,
            serializer: RecordSerializer::new(),
        }
    }

    pub fn list(&self, _ctx: &AppContext) -> AppResult<Vec<Fields>> {
        self.serializer.to_many(&self.repository.list()?)
    }

    pub fn create(&self, ctx: &AppContext, input: Fields) -> AppResult<Fields> {
        ctx.require_user()?;
        let mut entity = self.serializer.deserialize_create(ctx, input)?;
        self.repository.save(&mut entity, SaveOptions::default())?;
        info!(type_name = E::TYPE_NAME, id = ?entity.id(), "record created");
        self.serializer.to_fields(&entity)
    }

    pub fn retrieve(&self, ctx: &AppContext, id: RecordId) -> AppResult<Fields> {
        let entity = self.repository.get(id)?;
        self.permission.check(ctx, Access::Read, &entity)?;
        self.serializer.to_fields(&entity)
    }

    pub fn partial_update(&self, ctx: &AppContext, id: RecordId, input: Fields) -> AppResult<Fields> {
        ctx.require_user()?;
        let existing = self.repository.get(id)?;
        self.permission.check(ctx, Access::Write, &existing)?;

        let mut entity = self.serializer.deserialize_update(ctx, &existing, input)?;
        self.repository.save(&mut entity, SaveOptions::default())?;
        info!(
            type_name = E::TYPE_NAME,
            %id,
            version = %entity.version(),
            "record updated"
        );
        self.serializer.to_fields(&entity)
    }

    pub fn destroy(&self, ctx: &AppContext, id: RecordId) -> AppResult<()> {
        ctx.require_user()?;
        let existing = self.repository.get(id)?;
        self.permission.check(ctx, Access::Write, &existing)?;
        self.repository.delete(id)?;
        info!(type_name = E::TYPE_NAME, %id, "record deleted");
        Ok(())
    }
}
