//! 版本化字段集与持久化生命周期
//!
//! - 首次持久化：分配标识与 uuid，写入创建/更新时间，版本置为 1；
//! - 之后每次持久化：版本加 1，刷新更新时间，创建时间保持不变；
//! - 调用方可在持久化时覆写 `update_user` / `effective_user`；
//! - 审计用户与站点在持久化前必须齐备。
//!
use crate::entity::{RecordId, Reference, SiteId, UserId};
use crate::error::{DomainError, DomainResult};
use crate::value_object::Version;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 所有版本化记录共享的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionedFields {
    pub(crate) id: Option<RecordId>,
    pub(crate) uuid: Uuid,
    pub(crate) version: Version,
    pub enabled: bool,
    pub deleted: bool,
    pub(crate) creation_time: Option<DateTime<Utc>>,
    pub(crate) update_time: Option<DateTime<Utc>>,
    /// 创建记录的用户
    pub creation_user: Option<UserId>,
    /// 最近一次触发更新的用户
    pub update_user: Option<UserId>,
    /// 代为执行变更的目标用户
    pub effective_user: Option<UserId>,
    pub site: Option<SiteId>,
}

impl Default for VersionedFields {
    fn default() -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            version: Version::new(),
            enabled: true,
            deleted: false,
            creation_time: None,
            update_time: None,
            creation_user: None,
            update_user: None,
            effective_user: None,
            site: None,
        }
    }
}

/// 持久化时的可选覆写项
#[derive(Builder, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    update_user: Option<UserId>,
    effective_user: Option<UserId>,
}

impl SaveOptions {
    pub fn update_user(&self) -> Option<UserId> {
        self.update_user
    }

    pub fn effective_user(&self) -> Option<UserId> {
        self.effective_user
    }
}

impl VersionedFields {
    /// 以同一用户与站点初始化审计字段
    pub fn attributed(user: UserId, site: SiteId) -> Self {
        Self {
            creation_user: Some(user),
            update_user: Some(user),
            effective_user: Some(user),
            site: Some(site),
            ..Default::default()
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_time
    }

    pub fn update_time(&self) -> Option<DateTime<Utc>> {
        self.update_time
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// 应用调用方覆写；缺省则保留原值
    pub fn apply_options(&mut self, options: &SaveOptions) {
        if let Some(user) = options.update_user {
            self.update_user = Some(user);
        }
        if let Some(user) = options.effective_user {
            self.effective_user = Some(user);
        }
    }

    /// 审计用户与站点必须齐备
    pub fn validate_attribution(&self) -> DomainResult<()> {
        let required = [
            ("creation_user", self.creation_user.is_some()),
            ("update_user", self.update_user.is_some()),
            ("effective_user", self.effective_user.is_some()),
            ("site", self.site.is_some()),
        ];
        match required.iter().find(|(_, present)| !present) {
            Some((field, _)) => Err(DomainError::validation(*field, "this field is required")),
            None => Ok(()),
        }
    }

    pub(crate) fn attribution_references(&self) -> Vec<Reference> {
        let users = [self.creation_user, self.update_user, self.effective_user]
            .into_iter()
            .flatten()
            .map(Reference::User);
        users.chain(self.site.map(Reference::Site)).collect()
    }

    /// 首次持久化：分配标识、uuid 与时间，版本置 1
    pub(crate) fn stamp_created(&mut self, id: RecordId, now: DateTime<Utc>) {
        self.id = Some(id);
        if self.uuid.is_nil() {
            self.uuid = Uuid::new_v4();
        }
        self.creation_time = Some(now);
        self.update_time = Some(now);
        self.version = Version::new().next();
    }

    /// 后续持久化：以已存储的行作为基准递增版本
    pub(crate) fn stamp_updated(&mut self, stored: &VersionedFields, now: DateTime<Utc>) {
        self.id = stored.id;
        self.version = stored.version.next();
        self.creation_time = stored.creation_time;
        let update_time = match stored.creation_time {
            Some(created) => now.max(created),
            None => now,
        };
        self.update_time = Some(update_time);
    }
}
