//! 参考数据应用层（refdata-application）
//!
//! 在领域层之上提供：调用上下文、配置加载、记录序列化、
//! 对象级权限、管理界面元数据与记录服务。
//!
pub mod admin;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod labels;
pub mod permission;
pub mod serializer;
pub mod service;

pub use admin::{AdminRegistry, ModelAdmin};
pub use service::RecordService;
