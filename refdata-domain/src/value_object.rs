//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!

use std::fmt;

use crate::error::{DomainError, DomainResult};
use refdata_macros::value_object;
use serde::{Deserialize, Serialize};

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 版本号（记录每次成功持久化）
///
/// 未持久化时为 0，首次持久化后为 1，此后每次持久化加 1。
///
/// # 示例
///
/// ```
/// use refdata_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert_eq!(v1.value(), 0);
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(!v2.is_new());
///
/// assert!(v2 > v1);
/// ```
// 使用 value_object 宏提供基础的派生（Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq）
// 手动添加 Version 特有的派生（Copy, PartialOrd, Ord, Hash）
#[value_object]
#[derive(Copy, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// 创建初始版本（版本号为 0）
    pub const fn new() -> Self {
        Self(0)
    }

    /// 从值创建版本号
    ///
    /// # 示例
    ///
    /// ```
    /// use refdata_domain::value_object::Version;
    ///
    /// let v = Version::from_value(5);
    /// assert_eq!(v.value(), 5);
    /// ```
    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// 检查是否为初始版本（尚未持久化）
    pub fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.value()
    }
}

/// 优先级上限（与 PositiveSmallInteger 一致）
pub const PRIORITY_MAX: u16 = 32767;

/// 优先级：非负小整数，仅用于排序/展示
#[value_object]
#[derive(Copy, PartialOrd, Ord, Hash)]
pub struct Priority(u16);

impl Priority {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl ValueObject for Priority {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if self.0 > PRIORITY_MAX {
            return Err(DomainError::validation(
                "priority",
                format!("priority must be <= {PRIORITY_MAX}"),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 地理坐标精度：总位数与小数位
///
/// 取值范围限定整数部分至多 3 位，因此只需检查小数位。
pub const GEO_LOCATION_MAX_DIGITS: u32 = 9;
pub const GEO_LOCATION_DECIMAL_PLACES: u32 = 6;

fn check_geo_location(field: &str, value: f64, bound: f64) -> DomainResult<()> {
    if !(-bound < value && value < bound) {
        return Err(DomainError::validation(
            field,
            format!("{field} not in range of -{bound} < value < {bound}"),
        ));
    }
    let scale = 10f64.powi(GEO_LOCATION_DECIMAL_PLACES as i32);
    if (value * scale).round() / scale != value {
        return Err(DomainError::validation(
            field,
            format!(
                "{field} allows at most {GEO_LOCATION_DECIMAL_PLACES} decimal places \
                 ({GEO_LOCATION_MAX_DIGITS} digits in total)"
            ),
        ));
    }
    Ok(())
}

/// 纬度，取值须严格位于 (-90, 90)，反序列化同样经过校验
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Latitude(f64);

impl Latitude {
    /// 构造并校验
    pub fn new(value: f64) -> DomainResult<Self> {
        let lat = Self(value);
        lat.validate()?;
        Ok(lat)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Latitude {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        check_geo_location("latitude", self.0, 90.0)
    }
}

impl TryFrom<f64> for Latitude {
    type Error = DomainError;

    fn try_from(value: f64) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl From<Latitude> for f64 {
    fn from(lat: Latitude) -> Self {
        lat.0
    }
}

/// 经度，取值须严格位于 (-180, 180)
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Longitude(f64);

impl Longitude {
    pub fn new(value: f64) -> DomainResult<Self> {
        let lon = Self(value);
        lon.validate()?;
        Ok(lon)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Longitude {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        check_geo_location("longitude", self.0, 180.0)
    }
}

impl TryFrom<f64> for Longitude {
    type Error = DomainError;

    fn try_from(value: f64) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl From<Longitude> for f64 {
    fn from(lon: Longitude) -> Self {
        lon.0
    }
}
