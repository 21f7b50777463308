//! 对象级权限
//!
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use refdata_domain::entity::Entity;

/// 访问方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

pub trait Permission<E>: Send + Sync
where
    E: Entity,
{
    fn has_object_permission(&self, ctx: &AppContext, access: Access, obj: &E) -> bool;

    fn check(&self, ctx: &AppContext, access: Access, obj: &E) -> AppResult<()> {
        if self.has_object_permission(ctx, access, obj) {
            return Ok(());
        }
        Err(AppError::permission_denied(format!(
            "{access:?} access to {} denied",
            obj.display_name()
        )))
    }
}

/// 读取不受限；修改仅限创建者
#[derive(Debug, Clone, Copy, Default)]
pub struct IsCreatorOrReadOnly;

impl<E: Entity> Permission<E> for IsCreatorOrReadOnly {
    fn has_object_permission(&self, ctx: &AppContext, access: Access, obj: &E) -> bool {
        match access {
            Access::Read => true,
            Access::Write => {
                ctx.user().is_some() && obj.versioned().creation_user == ctx.user()
            }
        }
    }
}

/// 不做限制
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAny;

impl<E: Entity> Permission<E> for AllowAny {
    fn has_object_permission(&self, _: &AppContext, _: Access, _: &E) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdata_domain::entity::{SiteId, UserId};
    use refdata_domain::versioned;
    use refdata_domain::versioned::VersionedFields;

    #[versioned]
    struct Gender {}

    fn ctx(user: Option<i64>) -> AppContext {
        AppContext::builder()
            .maybe_user(user.map(UserId::new))
            .site(SiteId::new(1))
            .build()
    }

    #[test]
    fn only_creator_may_write() {
        let obj = Gender {
            versioned: VersionedFields::attributed(UserId::new(1), SiteId::new(1)),
        };
        let perm = IsCreatorOrReadOnly;

        for user in [None, Some(1), Some(2)] {
            assert!(perm.has_object_permission(&ctx(user), Access::Read, &obj));
        }
        assert!(perm.check(&ctx(Some(1)), Access::Write, &obj).is_ok());
        assert!(
            perm.check(&ctx(Some(2)), Access::Write, &obj)
                .unwrap_err()
                .is_permission_denied()
        );
        assert!(!perm.has_object_permission(&ctx(None), Access::Write, &obj));
    }

    #[test]
    fn record_without_creator_is_read_only() {
        let obj = Gender::default();
        assert!(!IsCreatorOrReadOnly.has_object_permission(&ctx(None), Access::Write, &obj));
        assert!(AllowAny.has_object_permission(&ctx(None), Access::Write, &obj));
    }
}
