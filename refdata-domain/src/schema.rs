//! 字段元数据（Schema）
//!
//! 以声明式描述共享字段集对应的列，供存储协作方建表与校验：
//! 可空性、唯一性、索引、长度上限、默认值以及外键的删除语义。
//! 所有外键一律采用限制性删除（`OnDelete::Protect`）。
//!
use crate::entity::Entity;
use crate::error::DomainResult;
use crate::named::{NAME_MAX_LENGTH, NameRule};
use crate::naming::{NamingConventions, TableNames};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    AutoId,
    Uuid,
    Integer,
    SmallInteger,
    Boolean,
    DateTime,
    Char,
    Text,
    ForeignKey { to: &'static str },
}

/// 被引用行删除时的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnDelete {
    Protect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub unique: bool,
    pub indexed: bool,
    pub editable: bool,
    pub max_length: Option<usize>,
    pub default: Option<&'static str>,
    pub on_delete: Option<OnDelete>,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            unique: false,
            indexed: false,
            editable: true,
            max_length: None,
            default: None,
            on_delete: None,
        }
    }

    const fn foreign_key(name: &'static str, to: &'static str) -> Self {
        let mut col = Self::new(name, ColumnKind::ForeignKey { to });
        col.on_delete = Some(OnDelete::Protect);
        col
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self.indexed = true;
        self
    }

    const fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    const fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }
}

/// 版本化记录的列
pub fn versioned_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", ColumnKind::AutoId).unique().read_only(),
        ColumnSpec::new("uuid", ColumnKind::Uuid).unique().read_only(),
        ColumnSpec::new("version", ColumnKind::Integer)
            .default_value("0")
            .read_only(),
        ColumnSpec::new("enabled", ColumnKind::Boolean).default_value("true"),
        ColumnSpec::new("deleted", ColumnKind::Boolean).default_value("false"),
        ColumnSpec::new("creation_time", ColumnKind::DateTime).read_only(),
        ColumnSpec::new("update_time", ColumnKind::DateTime).read_only(),
        ColumnSpec::foreign_key("creation_user", "user"),
        ColumnSpec::foreign_key("update_user", "user"),
        ColumnSpec::foreign_key("effective_user", "user"),
        ColumnSpec::foreign_key("site", "site"),
    ]
}

/// 命名字段集的列：名称是否可空/唯一取决于 `rule`
pub fn naming_columns(rule: NameRule) -> Vec<ColumnSpec> {
    let name = ColumnSpec::new("name", ColumnKind::Char).max_length(NAME_MAX_LENGTH);
    let name = match rule {
        NameRule::Required => name.unique(),
        NameRule::Optional => name.nullable(),
    };
    vec![
        name,
        ColumnSpec::new("alias", ColumnKind::Char)
            .max_length(NAME_MAX_LENGTH)
            .nullable(),
        ColumnSpec::new("description", ColumnKind::Text).nullable(),
    ]
}

pub fn prioritized_columns() -> Vec<ColumnSpec> {
    vec![ColumnSpec::new("priority", ColumnKind::SmallInteger).default_value("0")]
}

/// 某实体类型的表描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub type_name: &'static str,
    pub names: TableNames,
    /// 默认排序字段
    pub ordering: Vec<&'static str>,
    /// “最新”记录的判定字段
    pub get_latest_by: &'static str,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn for_entity<E: Entity>(
        namespace: &str,
        conventions: &NamingConventions,
    ) -> DomainResult<Self> {
        let columns = E::base_columns();
        let ordering = if columns.iter().any(|c| c.name == "name") {
            vec!["name"]
        } else {
            vec!["id"]
        };
        Ok(Self {
            type_name: E::TYPE_NAME,
            names: conventions.names_for(namespace, E::TYPE_NAME)?,
            ordering,
            get_latest_by: "update_time",
            columns,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}
