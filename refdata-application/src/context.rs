use crate::error::{AppError, AppResult};
use bon::Builder;
use refdata_domain::entity::{SiteId, UserId};

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用所需的横切信息：
/// - 当前用户（匿名请求为空）；
/// - 当前站点：新建记录归属的站点；
/// - 是否超级用户：决定管理列表的可见范围。
///
/// 上下文总是显式传入，不存在隐式的“当前站点”。
///
/// 典型用法：
/// ```rust
/// use refdata_application::context::AppContext;
/// use refdata_domain::entity::{SiteId, UserId};
///
/// let ctx = AppContext::builder()
///     .user(UserId::new(1))
///     .site(SiteId::new(1))
///     .build();
/// assert!(!ctx.is_superuser());
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppContext {
    user: Option<UserId>,
    site: SiteId,
    #[builder(default)]
    is_superuser: bool,
}

impl AppContext {
    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn site(&self) -> SiteId {
        self.site
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// 写操作要求已登录用户
    pub fn require_user(&self) -> AppResult<UserId> {
        self.user
            .ok_or_else(|| AppError::permission_denied("authentication required"))
    }
}
