// crates/mg_coarse/src/selector.rs

//! 精度/层级选择
//!
//! 基向量个数 `N` 已由分发器固定之后，根据精度和层级确定细向量类型：
//!
//! | 层级 | 细向量类型 |
//! |------|-----------|
//! | 0（最细层） | `SpinColourVector<S>`，只由精度决定 |
//! | > 0 | `VectorSinglet<S, N>`，由精度和 `N` 决定 |
//!
//! 链接场类型始终是 `MatrixSinglet<S, N>`。

use mg_config::{CoarseOperatorHandle, LevelClass};
use mg_runtime::{RuntimeScalar, SpinColourVector, TensorElement, VectorSinglet};
use tracing::debug;

use crate::builder::CoarseOperatorRequest;
use crate::coarsened::construct;
use crate::error::BuildError;

/// 精度到最细层物理向量类型的映射（对两种精度都有定义）
pub trait FinestLevelFineVec: RuntimeScalar {
    /// 最细层细向量
    type Vector: TensorElement<Scalar = Self>;
}

impl FinestLevelFineVec for f32 {
    type Vector = SpinColourVector<f32>;
}

impl FinestLevelFineVec for f64 {
    type Vector = SpinColourVector<f64>;
}

/// 选定细向量类型并构建 `N` 个基向量的特化
pub fn select_and_build<S: FinestLevelFineVec, const N: usize>(
    request: CoarseOperatorRequest,
) -> Result<CoarseOperatorHandle, BuildError> {
    let class = LevelClass::of(request.level);
    debug!(
        nbasis = N,
        precision = %S::PRECISION,
        level = request.level,
        %class,
        "selecting fine vector type"
    );

    match class {
        LevelClass::Finest => construct::<S::Vector, S, N>(request),
        LevelClass::Coarse => construct::<VectorSinglet<S, N>, S, N>(request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_runtime::{ElementKind, Precision};

    #[test]
    fn test_finest_level_mapping_is_total() {
        let single = <<f32 as FinestLevelFineVec>::Vector as TensorElement>::element_type();
        let double = <<f64 as FinestLevelFineVec>::Vector as TensorElement>::element_type();
        assert_eq!(single.kind, ElementKind::SpinColourVector);
        assert_eq!(single.precision, Precision::F32);
        assert_eq!(double.kind, ElementKind::SpinColourVector);
        assert_eq!(double.precision, Precision::F64);
    }
}
