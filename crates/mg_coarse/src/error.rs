// crates/mg_coarse/src/error.rs

//! 构建错误
//!
//! 分发器和兼容性检查产生的错误都会同步中止整个构建，内部不捕获也不重试。

use mg_config::ConfigError;
use mg_runtime::ElementType;

/// 构建错误
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 基向量个数不在受支持的集合中
    #[error("Unknown basis size {0}")]
    UnknownBasisSize(usize),

    /// 链接场元素类型与特化要求的类型不一致
    #[error("Incompatible link field in slot {slot}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// 槽位编号
        slot: usize,
        /// 期望的元素类型
        expected: ElementType,
        /// 实际的元素类型
        actual: ElementType,
    },

    /// 链接场所在网格与算子网格不一致
    #[error("link field in slot {slot} lives on grid {actual}, operator grid is {expected}")]
    GridMismatch {
        /// 槽位编号
        slot: usize,
        /// 算子网格
        expected: String,
        /// 链接场网格
        actual: String,
    },

    /// 网格无法承载 9 点模板
    #[error("invalid coarse grid: {0}")]
    InvalidGrid(String),

    /// 参数缺失或格式错误
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BuildError {
    /// 出错的链接槽位（仅对槽位相关错误有值）
    pub fn slot(&self) -> Option<usize> {
        match self {
            BuildError::TypeMismatch { slot, .. } | BuildError::GridMismatch { slot, .. } => {
                Some(*slot)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_runtime::{ElementKind, Precision};

    #[test]
    fn test_unknown_basis_size_message() {
        assert_eq!(BuildError::UnknownBasisSize(7).to_string(), "Unknown basis size 7");
        assert_eq!(BuildError::UnknownBasisSize(7).slot(), None);
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = BuildError::TypeMismatch {
            slot: 4,
            expected: ElementType::new(ElementKind::MatrixSinglet(8), Precision::F64),
            actual: ElementType::new(ElementKind::MatrixSinglet(8), Precision::F32),
        };
        assert_eq!(
            err.to_string(),
            "Incompatible link field in slot 4: expected ot_matrix_singlet(8)<f64>, \
             found ot_matrix_singlet(8)<f32>"
        );
        assert_eq!(err.slot(), Some(4));
    }
}
