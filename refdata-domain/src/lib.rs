//! 参考数据领域层（refdata-domain）
//!
//! 为“版本化、可命名的参考数据”提供通用构件：
//! - 命名约定（`naming`）：类型名到表标识、可读名与复数名的推导
//! - 版本化记录（`versioned`）与实体抽象（`entity`）：标识、uuid、版本、审计与站点字段
//! - 命名记录（`named`）与优先级记录（`prioritized`）
//! - 字段元数据（`schema`）：列的可空性、唯一性与限制性外键
//! - 仓储（`persist`）：仓储协议、引用目录与内存实现
//! - 规约（`specification`）与值对象（`value_object`）
//!
//! 典型用法：
//! 1. 以 `#[versioned(named)]` 等声明记录类型；
//! 2. 在 `Directory` 中登记用户与站点；
//! 3. 通过 `InMemoryRepository`（或自定义的 `Repository` 实现）持久化记录，
//!    每次保存版本加 1，审计字段齐备后方可写入。
//!
pub mod entity;
pub mod error;
pub mod named;
pub mod naming;
pub mod persist;
pub mod prioritized;
pub mod schema;
pub mod specification;
pub mod value_object;
pub mod versioned;

pub use refdata_macros::{entity_id, value_object, versioned};

// 允许在本 crate 内部通过 ::refdata_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::refdata_domain 路径。
extern crate self as refdata_domain;
