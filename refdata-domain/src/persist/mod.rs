//! 持久化协议（persist）
//!
//! 定义存储协作方需满足的仓储接口，以及用于测试与演示的内存实现：
//! - 版本化记录的创建/更新/查找/删除（`Repository`）；
//! - 命名记录按名称查找与哨兵回退（`NamedRepository`）；
//! - 审计用户、站点与记录间的引用计数（`Directory`）。
//!
//! 真实数据库后端由上层提供实现并注入。
//!
mod directory;
mod inmemory;
mod repository;

pub use directory::Directory;
pub use inmemory::InMemoryRepository;
pub use repository::{NamedRepository, Repository};
