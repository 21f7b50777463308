use serde::Serialize;
use serde_json::{Map, Value};

/// 扁平字段表：记录的所有字段（含共享字段集）位于同一层级
pub type Fields = Map<String, Value>;

/// 数据传输对象（DTO）
///
/// - 作为应用层的输出载体，面向接口/外部系统序列化友好；
/// - 与领域模型解耦，避免将领域对象直接暴露到接口层。
pub trait Dto: Serialize + Send + Sync + 'static {}
