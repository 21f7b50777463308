//! 参考数据过程宏（refdata-macros）
//!
//! - `#[versioned]`：为记录结构体注入共享字段集并实现 `Entity` / `Named` / `Prioritized`
//! - `#[entity_id]`：为单字段 tuple struct 形式的标识类型补齐派生与转换
//! - `#[value_object]`：为值对象补齐常用派生
//!
use proc_macro::TokenStream;

mod entity_id;
mod utils;
mod value_object;
mod versioned;

/// 版本化记录宏
///
/// 在字段最前注入（若缺失）：
/// - `versioned: VersionedFields`（始终）
/// - `naming: NamingFields`（`named` / `optional_named`）
/// - `priority: PrioritizedFields`（`prioritized`）
///
/// 注入字段均以 `#[serde(flatten)]` 展开，序列化结果为扁平字段表。
///
/// 支持参数：
/// - `named`：名称必填且表内唯一；`optional_named`：名称可空
/// - `prioritized`：携带优先级
/// - `validate = path`：附加校验函数 `fn(&Self) -> DomainResult<()>`
/// - `foreign_keys = path`：外键函数 `fn(&Self) -> Vec<Reference>`
/// - `debug = true|false`：是否派生 Debug，默认 true
///
/// ```ignore
/// #[versioned(named, foreign_keys = Self::country_ref)]
/// pub struct Province {
///     pub iso_code: String,
///     pub country: RecordId,
/// }
/// ```
#[proc_macro_attribute]
pub fn versioned(attr: TokenStream, item: TokenStream) -> TokenStream {
    versioned::expand(attr, item)
}

/// 实体 ID 宏
/// 用于 `struct UserId(i64);` 这类标识类型，自动实现：
/// - `new`、`Display`、`FromStr`
/// - `AsRef` / `AsMut` 与内外类型之间的 `From`
/// 仅支持单字段的 `tuple struct`。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
/// 合并派生 Default, Clone, Debug（可关闭）, Serialize, Deserialize, PartialEq, Eq
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
