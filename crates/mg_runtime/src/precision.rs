// crates/mg_runtime/src/precision.rs

//! 运行时精度选择
//!
//! 配置层和应用层唯一接触的精度类型，用于在构建时决定使用单精度还是双精度的
//! 粗化算子特化。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 运行时精度选择
///
/// 与格点库的 `single` / `double` 精度一一对应。
///
/// # 示例
///
/// ```
/// use mg_runtime::Precision;
///
/// let precision: Precision = "double".parse().unwrap();
/// assert_eq!(precision, Precision::F64);
/// assert_eq!(precision.complex_bytes(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 单精度（vComplexF）
    #[serde(alias = "single")]
    F32,
    /// 双精度（vComplexD）
    #[default]
    #[serde(alias = "double")]
    F64,
}

impl Precision {
    /// 两种受支持的精度
    pub const ALL: [Precision; 2] = [Precision::F32, Precision::F64];

    /// 获取精度名称
    pub fn name(&self) -> &'static str {
        match self {
            Precision::F32 => "f32",
            Precision::F64 => "f64",
        }
    }

    /// 格点库风格的名称
    pub fn lattice_name(&self) -> &'static str {
        match self {
            Precision::F32 => "single",
            Precision::F64 => "double",
        }
    }

    /// 实数分量字节数
    pub fn size_bytes(&self) -> usize {
        match self {
            Precision::F32 => 4,
            Precision::F64 => 8,
        }
    }

    /// 复数分量字节数
    pub fn complex_bytes(&self) -> usize {
        2 * self.size_bytes()
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Precision {
    type Err = PrecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f32" | "float" | "single" => Ok(Precision::F32),
            "f64" | "double" => Ok(Precision::F64),
            _ => Err(PrecisionParseError(s.to_string())),
        }
    }
}

/// 精度解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid precision '{0}', expected 'single'/'f32' or 'double'/'f64'")]
pub struct PrecisionParseError(pub String);
