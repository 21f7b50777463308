//! 记录序列化
//!
//! 记录与扁平字段表（[`Fields`]）之间的转换：
//! - 输入中的只读字段被忽略；
//! - 创建时缺省的站点与审计用户取自上下文，更新时仅补齐 `update_user` / `effective_user`；
//! - 返回前完成校验。
//!
use crate::context::AppContext;
use crate::dto::Fields;
use crate::error::AppResult;
use refdata_domain::entity::Entity;
use refdata_domain::error::DomainError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// 由存储维护、输入时忽略的字段
pub const READ_ONLY_FIELDS: [&str; 5] = ["id", "uuid", "version", "creation_time", "update_time"];

pub struct RecordSerializer<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> Default for RecordSerializer<E> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> RecordSerializer<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_fields(&self, entity: &E) -> AppResult<Fields> {
        match serde_json::to_value(entity)? {
            Value::Object(fields) => Ok(fields),
            other => Err(DomainError::validation(
                E::TYPE_NAME,
                format!("expected a field map, got {other}"),
            )
            .into()),
        }
    }

    pub fn to_many(&self, entities: &[E]) -> AppResult<Vec<Fields>> {
        entities.iter().map(|e| self.to_fields(e)).collect()
    }

    /// 构造新记录（未持久化）
    pub fn deserialize_create(&self, ctx: &AppContext, mut input: Fields) -> AppResult<E> {
        strip_read_only(&mut input);

        input
            .entry("site")
            .or_insert_with(|| Value::from(i64::from(ctx.site())));
        if let Some(user) = ctx.user() {
            for field in ["creation_user", "effective_user", "update_user"] {
                input
                    .entry(field)
                    .or_insert_with(|| Value::from(i64::from(user)));
            }
        }

        let entity: E = decode(input)?;
        validate(&entity)?;
        Ok(entity)
    }

    /// 在已存储记录上应用部分更新；创建用户与站点保持不变，除非输入显式给出
    pub fn deserialize_update(
        &self,
        ctx: &AppContext,
        existing: &E,
        mut input: Fields,
    ) -> AppResult<E> {
        strip_read_only(&mut input);

        if let Some(user) = ctx.user() {
            for field in ["effective_user", "update_user"] {
                input
                    .entry(field)
                    .or_insert_with(|| Value::from(i64::from(user)));
            }
        }

        let mut merged = self.to_fields(existing)?;
        merged.extend(input);

        let entity: E = decode(merged)?;
        validate(&entity)?;
        Ok(entity)
    }
}

fn strip_read_only(input: &mut Fields) {
    for field in READ_ONLY_FIELDS {
        input.remove(field);
    }
}

// 缺字段、类型不符或越界的输入均归为校验错误
fn decode<E>(fields: Fields) -> AppResult<E>
where
    E: Entity + DeserializeOwned,
{
    serde_json::from_value(Value::Object(fields)).map_err(|err| {
        let reason = err.to_string();
        let field = missing_field(&reason).unwrap_or(E::TYPE_NAME).to_string();
        DomainError::validation(field, reason).into()
    })
}

fn missing_field(reason: &str) -> Option<&str> {
    reason.strip_prefix("missing field `")?.split('`').next()
}

fn validate<E: Entity>(entity: &E) -> AppResult<()> {
    entity.versioned().validate_attribution()?;
    entity.validate()?;
    Ok(())
}
