//! 命名约定（Naming Conventions）
//!
//! 由类型名与应用命名空间推导展示名、复数名与数据表标识：
//! - `verbose_name("MyModel")` → `"my model"`
//! - `pluralize("MyModel")` → `"MyModels"`
//! - `table_identifier_for_type("MyModel")` → `"my_model"`
//! - `table_identifier("test_inflection", "MyModel", None)` → `"sl_test_inflection_my_model"`
//!
//! 全部为纯函数；非法标识符返回 `DomainError::InvalidIdentifier`。
//!
use crate::error::{DomainError, DomainResult};
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// 默认站点标签
pub const SITE_LABEL: &str = "sl";

// 不可数名词（原样返回）
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

// 不规则复数（单数, 复数），均为小写
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

/// 校验类型名/命名空间是否为合法标识符：ASCII 字母开头，其后仅含字母、数字或下划线
pub fn validate_identifier(value: &str) -> DomainResult<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidIdentifier {
            value: value.to_string(),
        })
    }
}

/// 按大小写边界拆分类型名并以下划线连接（小写）
pub fn table_identifier_for_type(type_name: &str) -> DomainResult<String> {
    validate_identifier(type_name)?;
    Ok(type_name.to_case(Case::Snake))
}

/// 生成展示名：与表标识相同的拆分规则，分隔符为空格
pub fn verbose_name(type_name: &str) -> DomainResult<String> {
    Ok(table_identifier_for_type(type_name)?.replace('_', " "))
}

/// 英文复数化（作用于原始类型名，保留词干大小写）
pub fn pluralize(type_name: &str) -> DomainResult<String> {
    // 展示名含空格，按词校验
    if type_name.split(' ').any(|w| validate_identifier(w).is_err()) {
        return Err(DomainError::InvalidIdentifier {
            value: type_name.to_string(),
        });
    }
    Ok(pluralize_word(type_name))
}

fn pluralize_word(word: &str) -> String {
    // 仅最后一个“词”参与变形：按大小写边界或空格找到词尾
    let tail_start = last_word_start(word);
    let (head, tail) = word.split_at(tail_start);
    let lower = tail.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return format!("{head}{}", match_case(tail, plural));
    }

    let suffix_es = ["s", "x", "z", "ch", "sh"];
    if suffix_es.iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }

    if let Some(stem) = lower.strip_suffix('y') {
        let before = stem.chars().last();
        if matches!(before, Some(c) if !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    format!("{word}s")
}

fn last_word_start(word: &str) -> usize {
    let bytes = word.as_bytes();
    let mut start = 0;
    for i in 1..bytes.len() {
        let (prev, cur) = (bytes[i - 1], bytes[i]);
        if cur == b' ' || cur == b'_' {
            start = i + 1;
        } else if prev.is_ascii_lowercase() && cur.is_ascii_uppercase() {
            start = i;
        }
    }
    start.min(word.len())
}

// 让替换的复数形式沿用原词首字母大小写
fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let mut out = replacement.to_string();
            if let Some(first) = out.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            out
        }
        _ => replacement.to_string(),
    }
}

/// 组合命名空间与类型名为表名：`{site_label}_{namespace}_{type}`
///
/// `site_label` 为空或缺省时使用 [`SITE_LABEL`]。
pub fn table_identifier(
    namespace: &str,
    type_name: &str,
    site_label: Option<&str>,
) -> DomainResult<String> {
    validate_identifier(namespace)?;
    let table = table_identifier_for_type(type_name)?;
    let label = site_label.filter(|l| !l.is_empty()).unwrap_or(SITE_LABEL);
    Ok(format!("{label}_{namespace}_{table}"))
}

/// 可配置的命名约定（默认站点标签）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConventions {
    pub site_label: String,
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self {
            site_label: SITE_LABEL.to_string(),
        }
    }
}

impl NamingConventions {
    pub fn new(site_label: impl Into<String>) -> Self {
        Self {
            site_label: site_label.into(),
        }
    }

    /// 使用本约定的站点标签生成表名
    pub fn table_identifier(&self, namespace: &str, type_name: &str) -> DomainResult<String> {
        table_identifier(namespace, type_name, Some(&self.site_label))
    }

    /// 一次性推导某类型的全部名称
    pub fn names_for(&self, namespace: &str, type_name: &str) -> DomainResult<TableNames> {
        let verbose = verbose_name(type_name)?;
        let verbose_plural = pluralize(&verbose)?;
        Ok(TableNames {
            db_table: self.table_identifier(namespace, type_name)?,
            verbose_name: verbose,
            verbose_name_plural: verbose_plural,
        })
    }
}

/// 某实体类型的名称集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    pub db_table: String,
    pub verbose_name: String,
    pub verbose_name_plural: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_name_splits_words() {
        assert_eq!(verbose_name("MyModel").unwrap(), "my model");
        assert_eq!(verbose_name("Country").unwrap(), "country");
        assert_eq!(verbose_name("HTTPServer").unwrap(), "http server");
    }

    #[test]
    fn pluralize_regular_and_irregular() {
        assert_eq!(pluralize("MyModel").unwrap(), "MyModels");
        assert_eq!(pluralize("Country").unwrap(), "Countries");
        assert_eq!(pluralize("Day").unwrap(), "Days");
        assert_eq!(pluralize("Address").unwrap(), "Addresses");
        assert_eq!(pluralize("Box").unwrap(), "Boxes");
        assert_eq!(pluralize("Branch").unwrap(), "Branches");
        assert_eq!(pluralize("Person").unwrap(), "People");
        assert_eq!(pluralize("SalesPerson").unwrap(), "SalesPeople");
        assert_eq!(pluralize("Equipment").unwrap(), "Equipment");
        assert_eq!(pluralize("document orientation").unwrap(), "document orientations");
    }

    #[test]
    fn table_identifier_for_type_uses_underscores() {
        assert_eq!(table_identifier_for_type("MyModel").unwrap(), "my_model");
        assert_eq!(
            table_identifier_for_type("DocumentOrientation").unwrap(),
            "document_orientation"
        );
    }

    #[test]
    fn verbose_and_table_decompose_identically() {
        for name in ["MyModel", "ImageFormat", "HTTPServer", "Gender", "ABCThing"] {
            let table = table_identifier_for_type(name).unwrap();
            let verbose = verbose_name(name).unwrap();
            assert_eq!(table.replace('_', " "), verbose);
        }
    }

    #[test]
    fn table_identifier_defaults_site_label() {
        assert_eq!(
            table_identifier("test_inflection", "MyModel", None).unwrap(),
            "sl_test_inflection_my_model"
        );
        assert_eq!(
            table_identifier("test_inflection", "MyModel", Some("")).unwrap(),
            "sl_test_inflection_my_model"
        );
        assert_eq!(
            table_identifier("core", "Country", Some("ab")).unwrap(),
            "ab_core_country"
        );
    }

    #[test]
    fn malformed_identifiers_rejected() {
        for bad in ["", "1Model", "My-Model", "My Model", "_Model", "Módel"] {
            let err = table_identifier_for_type(bad).unwrap_err();
            assert!(matches!(err, DomainError::InvalidIdentifier { .. }), "{bad}");
        }
        assert!(table_identifier("bad app", "MyModel", None).is_err());
        assert!(pluralize("").is_err());
    }

    #[test]
    fn conventions_derive_table_names() {
        let names = NamingConventions::default()
            .names_for("core", "ImageFormat")
            .unwrap();
        assert_eq!(names.db_table, "sl_core_image_format");
        assert_eq!(names.verbose_name, "image format");
        assert_eq!(names.verbose_name_plural, "image formats");

        let custom = NamingConventions::new("xy");
        assert_eq!(
            custom.table_identifier("core", "Gender").unwrap(),
            "xy_core_gender"
        );
    }
}
