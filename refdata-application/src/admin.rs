//! 管理界面元数据
//!
//! 描述记录在管理界面中的呈现方式（字段分组、列表列、过滤、搜索、排序与只读字段），
//! 并在保存时补齐系统字段。渲染由展示协作方完成，本模块只提供数据。
//!
use crate::config::AdminSettings;
use crate::context::AppContext;
use crate::dto::Dto;
use crate::error::{AppError, AppResult};
use crate::labels;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use refdata_domain::entity::{Entity, RecordId};
use refdata_domain::named::Named;
use refdata_domain::persist::Repository;
use refdata_domain::specification::{AnyRecord, CreatedBy, Sentinel, Specification};
use refdata_domain::versioned::SaveOptions;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, info};

/// 字段分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSet {
    pub title: String,
    pub collapsed: bool,
    pub fields: Vec<&'static str>,
}

impl FieldSet {
    fn collapsed(title: &str, fields: &[&'static str]) -> Self {
        Self {
            title: title.to_string(),
            collapsed: true,
            fields: fields.to_vec(),
        }
    }

    pub fn system() -> Self {
        Self::collapsed("System", &["id", "uuid", "version", "site"])
    }

    pub fn audit() -> Self {
        Self::collapsed(
            "Audit",
            &[
                "effective_user",
                "update_time",
                "update_user",
                "creation_time",
                "creation_user",
            ],
        )
    }

    pub fn details() -> Self {
        Self::collapsed("Details", &["enabled", "deleted"])
    }

    /// 命名记录的首个分组，以模型名为标题
    pub fn naming(model_name: &str) -> Self {
        Self {
            title: model_name.to_string(),
            collapsed: false,
            fields: vec!["name", "alias", "description"],
        }
    }
}

/// 列表中名称/别名列的伪字段
pub const NAME_COLUMN: &str = "get_name";
pub const ALIAS_COLUMN: &str = "get_alias";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminLayout {
    pub fieldsets: Vec<FieldSet>,
    pub list_display: Vec<&'static str>,
    pub list_display_links: Vec<&'static str>,
    pub list_filter: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
    pub date_hierarchy: &'static str,
    pub readonly_fields: Vec<&'static str>,
    pub ordering: Vec<&'static str>,
}

impl AdminLayout {
    pub fn versioned() -> Self {
        Self {
            fieldsets: vec![FieldSet::details(), FieldSet::audit(), FieldSet::system()],
            list_display: vec!["id", "version", "update_time", "update_user"],
            list_display_links: vec!["id"],
            list_filter: vec!["update_time"],
            search_fields: Vec::new(),
            date_hierarchy: "update_time",
            readonly_fields: vec![
                "id",
                "creation_time",
                "creation_user",
                "deleted",
                "site",
                "update_time",
                "update_user",
                "effective_user",
                "uuid",
                "version",
            ],
            ordering: vec!["id"],
        }
    }

    pub fn named(model_name: &str) -> Self {
        let base = Self::versioned();
        let mut fieldsets = vec![FieldSet::naming(model_name)];
        fieldsets.extend(base.fieldsets.iter().cloned());
        Self {
            fieldsets,
            list_display: vec![
                "id",
                NAME_COLUMN,
                ALIAS_COLUMN,
                "version",
                "update_time",
                "update_user",
            ],
            list_display_links: vec!["id", NAME_COLUMN],
            list_filter: vec!["name", "update_time"],
            search_fields: vec!["name"],
            ordering: vec!["name"],
            ..base
        }
    }

    pub fn prioritized() -> Self {
        Self {
            list_display: vec!["id", "priority", "version", "update_time", "update_user"],
            ..Self::versioned()
        }
    }

    /// 由实体的列推断布局
    pub fn for_entity<E: Entity>() -> Self {
        let columns = E::base_columns();
        let has = |name: &str| columns.iter().any(|c| c.name == name);
        if has("name") {
            Self::named(E::TYPE_NAME)
        } else if has("priority") {
            Self::prioritized()
        } else {
            Self::versioned()
        }
    }
}

/// 管理类名：`{TypeName}Admin`
pub fn admin_class_name<E: Entity>() -> String {
    format!("{}Admin", E::TYPE_NAME)
}

/// 列表行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeListRow {
    pub id: Option<RecordId>,
    pub columns: Vec<(&'static str, Value)>,
}

impl Dto for ChangeListRow {}

impl ChangeListRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}

type RowSpec<E> = Box<dyn Specification<E> + Send + Sync>;

pub struct ModelAdmin<E, R>
where
    E: Entity,
    R: Repository<E>,
{
    name: String,
    layout: AdminLayout,
    display_name_size: usize,
    limit_to_request_user: bool,
    // 匹配的记录仅对超级用户可见
    superuser_only: Option<RowSpec<E>>,
    repository: R,
    _marker: PhantomData<fn() -> E>,
}

impl<E, R> ModelAdmin<E, R>
where
    E: Entity + Serialize,
    R: Repository<E>,
{
    pub fn new(repository: R, settings: &AdminSettings) -> Self {
        Self {
            name: admin_class_name::<E>(),
            layout: AdminLayout::for_entity::<E>(),
            display_name_size: settings.display_name_size,
            limit_to_request_user: settings.limit_to_request_user,
            superuser_only: None,
            repository,
            _marker: PhantomData,
        }
    }

    pub fn with_layout(mut self, layout: AdminLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn limit_to_request_user(mut self, limit: bool) -> Self {
        self.limit_to_request_user = limit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &AdminLayout {
        &self.layout
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// 补齐系统字段：首次保存写入创建用户与站点，每次保存写入更新/生效用户
    pub fn prepare_system_fields(&self, ctx: &AppContext, obj: &mut E) -> AppResult<()> {
        let user = ctx.require_user()?;
        let v = obj.versioned_mut();
        if !v.is_persisted() {
            v.creation_user = Some(user);
            v.site = Some(ctx.site());
        }
        v.update_user = Some(user);
        v.effective_user = Some(user);
        Ok(())
    }

    pub fn save_model(&self, ctx: &AppContext, obj: &mut E) -> AppResult<()> {
        self.prepare_system_fields(ctx, obj)?;
        self.repository.save(obj, SaveOptions::default())?;
        debug!(admin = %self.name, id = ?obj.id(), version = %obj.version(), "model saved");
        Ok(())
    }

    /// 当前用户可见的记录
    pub fn queryset(&self, ctx: &AppContext) -> AppResult<Vec<E>> {
        let rows = self.repository.list()?;
        if ctx.is_superuser() {
            return Ok(rows);
        }
        let visible = self.visibility(ctx);
        Ok(rows
            .into_iter()
            .filter(|row| visible.is_satisfied_by(row))
            .collect())
    }

    // 非超级用户的可见性规约
    fn visibility(&self, ctx: &AppContext) -> Box<dyn Specification<E> + '_> {
        let mut spec: Box<dyn Specification<E> + '_> = Box::new(AnyRecord::<E>::default());
        if self.limit_to_request_user {
            spec = match ctx.user() {
                Some(user) => Box::new(spec.and(CreatedBy::<E>::new(user))),
                // 匿名用户看不到任何记录
                None => Box::new(spec.not()),
            };
        }
        if let Some(hidden) = &self.superuser_only {
            spec = Box::new(spec.and(hidden.not()));
        }
        spec
    }

    /// 列表表头
    pub fn column_headers(&self) -> Vec<&'static str> {
        self.layout
            .list_display
            .iter()
            .map(|column| match *column {
                NAME_COLUMN => "name",
                ALIAS_COLUMN => "alias",
                other => labels::label(other),
            })
            .collect()
    }

    pub fn changelist(&self, ctx: &AppContext) -> AppResult<Vec<ChangeListRow>> {
        self.queryset(ctx)?
            .iter()
            .map(|row| self.changelist_row(row))
            .collect()
    }

    fn changelist_row(&self, obj: &E) -> AppResult<ChangeListRow> {
        let fields = match serde_json::to_value(obj)? {
            Value::Object(fields) => fields,
            _ => Default::default(),
        };
        let text = |field: &str| -> Value {
            let value = fields.get(field).and_then(Value::as_str).unwrap_or_default();
            Value::from(self.truncate(value))
        };

        let columns = self
            .layout
            .list_display
            .iter()
            .map(|column| {
                let value = match *column {
                    NAME_COLUMN => text("name"),
                    ALIAS_COLUMN => text("alias"),
                    field => fields.get(field).cloned().unwrap_or(Value::Null),
                };
                (*column, value)
            })
            .collect();

        Ok(ChangeListRow {
            id: obj.id(),
            columns,
        })
    }

    fn truncate(&self, value: &str) -> String {
        value.chars().take(self.display_name_size).collect()
    }
}

impl<E, R> ModelAdmin<E, R>
where
    E: Named + Serialize,
    R: Repository<E>,
{
    /// 命名记录的管理：`UNKNOWN` 哨兵仅对超级用户可见
    pub fn named(repository: R, settings: &AdminSettings) -> Self {
        let mut admin = Self::new(repository, settings);
        admin.superuser_only = Some(Box::new(Sentinel::<E>::default()));
        admin
    }
}

/// 已注册管理的只读视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminEntry {
    pub type_name: &'static str,
    pub admin_name: String,
    pub layout: AdminLayout,
}

/// 管理注册表
/// - 以实体类型名为键，显式注册
/// - 同一类型重复注册返回错误
#[derive(Default)]
pub struct AdminRegistry {
    entries: DashMap<&'static str, AdminEntry>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E, R>(&self, admin: &ModelAdmin<E, R>) -> AppResult<()>
    where
        E: Entity + Serialize,
        R: Repository<E>,
    {
        match self.entries.entry(E::TYPE_NAME) {
            Entry::Occupied(entry) => Err(AppError::AlreadyRegistered {
                admin: entry.get().admin_name.clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(AdminEntry {
                    type_name: E::TYPE_NAME,
                    admin_name: admin.name().to_string(),
                    layout: admin.layout().clone(),
                });
                info!(admin = admin.name(), "admin registered");
                Ok(())
            }
        }
    }

    pub fn get(&self, type_name: &str) -> Option<AdminEntry> {
        self.entries.get(type_name).map(|e| e.value().clone())
    }

    /// 已注册的管理类名（按名称排序）
    pub fn registered(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.value().admin_name.clone())
            .collect();
        names.sort();
        names
    }
}
