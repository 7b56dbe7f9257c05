// crates/mg_coarse/src/compat.rs

//! 兼容性检查
//!
//! 检查类型擦除的链接场是否确实存放着特化所要求的元素类型。检查是只读的，
//! 9 个槽位全部通过之后才会把场移入算子，任何一个槽位失败都会中止构建。

use std::sync::Arc;

use mg_runtime::{GridCartesian, Lattice, LatticeField, TensorElement};
use tracing::trace;

use crate::error::BuildError;
use crate::links::{LinkFields, NUM_LINKS};

/// 检查单个槽位，成功时返回具体类型的场引用
pub fn compatible<T: TensorElement>(
    slot: usize,
    field: &dyn LatticeField,
) -> Result<&Lattice<T>, BuildError> {
    let expected = T::element_type();
    let actual = field.element_type();
    if actual != expected {
        return Err(BuildError::TypeMismatch { slot, expected, actual });
    }
    field
        .as_any()
        .downcast_ref::<Lattice<T>>()
        .ok_or(BuildError::TypeMismatch { slot, expected, actual })
}

/// 按槽位顺序检查全部链接场
///
/// 元素类型先于网格检查；报告第一个失败的槽位。
pub fn validate_links<T: TensorElement>(
    grid: &GridCartesian,
    links: &LinkFields,
) -> Result<(), BuildError> {
    for (slot, field) in links.iter().enumerate() {
        let lattice = compatible::<T>(slot, field)?;
        if !lattice.grid().is_conformable(grid) {
            return Err(BuildError::GridMismatch {
                slot,
                expected: grid.to_string(),
                actual: lattice.grid().to_string(),
            });
        }
        trace!(slot, element = %T::element_type(), "link field validated");
    }
    Ok(())
}

/// 把已检查过的链接场移入定长数组
pub fn bind_links<T: TensorElement>(
    links: LinkFields,
) -> Result<[Lattice<T>; NUM_LINKS], BuildError> {
    let expected = T::element_type();
    let bound = links
        .into_inner()
        .into_iter()
        .enumerate()
        .map(|(slot, field)| {
            let actual = field.element_type();
            field
                .into_any()
                .downcast::<Lattice<T>>()
                .map(|lattice| *lattice)
                .map_err(|_| BuildError::TypeMismatch { slot, expected, actual })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let n = bound.len();
    bound.try_into().map_err(|_| {
        BuildError::InvalidParameter(format!("expected {} link fields, got {}", NUM_LINKS, n))
    })
}

/// 共享网格版本的检查，供构建器使用
pub(crate) fn validate_and_bind<T: TensorElement>(
    grid: &Arc<GridCartesian>,
    links: LinkFields,
) -> Result<[Lattice<T>; NUM_LINKS], BuildError> {
    validate_links::<T>(grid, &links)?;
    bind_links::<T>(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_runtime::{LatticeHandle, MatrixSinglet, Precision, VectorSinglet};

    fn grid(precision: Precision) -> Arc<GridCartesian> {
        GridCartesian::shared(vec![1, 1, 2, 2], precision).unwrap()
    }

    fn links_f64_4(grid: &Arc<GridCartesian>) -> Vec<LatticeHandle> {
        (0..NUM_LINKS)
            .map(|_| {
                Lattice::<MatrixSinglet<f64, 4>>::zeros(grid.clone())
                    .unwrap()
                    .into_handle()
            })
            .collect()
    }

    #[test]
    fn test_compatible_accepts_matching_type() {
        let g = grid(Precision::F64);
        let handle = Lattice::<MatrixSinglet<f64, 4>>::random(g, 1).unwrap().into_handle();
        let lattice = compatible::<MatrixSinglet<f64, 4>>(0, handle.as_ref()).unwrap();
        assert_eq!(lattice.norm2(), handle.norm2());
    }

    #[test]
    fn test_compatible_rejects_shape_and_precision() {
        let g = grid(Precision::F64);
        let vector = Lattice::<VectorSinglet<f64, 4>>::zeros(g.clone()).unwrap().into_handle();
        let err = compatible::<MatrixSinglet<f64, 4>>(2, vector.as_ref()).unwrap_err();
        assert_eq!(err.slot(), Some(2));

        let single = Lattice::<MatrixSinglet<f32, 4>>::zeros(g).unwrap().into_handle();
        match compatible::<MatrixSinglet<f64, 4>>(5, single.as_ref()) {
            Err(BuildError::TypeMismatch { slot, expected, actual }) => {
                assert_eq!(slot, 5);
                assert_eq!(expected.precision, Precision::F64);
                assert_eq!(actual.precision, Precision::F32);
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reports_grid_mismatch() {
        let g = grid(Precision::F64);
        let other = GridCartesian::shared(vec![2, 2, 2, 2], Precision::F64).unwrap();
        let mut links = LinkFields::try_from(links_f64_4(&g)).unwrap();
        links
            .replace(6, Lattice::<MatrixSinglet<f64, 4>>::zeros(other).unwrap().into_handle())
            .unwrap();

        let err = validate_links::<MatrixSinglet<f64, 4>>(&g, &links).unwrap_err();
        assert!(matches!(err, BuildError::GridMismatch { slot: 6, .. }));
    }

    #[test]
    fn test_bind_preserves_slot_order() {
        let g = grid(Precision::F64);
        let fields: Vec<LatticeHandle> = (0..NUM_LINKS as u64)
            .map(|seed| {
                Lattice::<MatrixSinglet<f64, 4>>::random(g.clone(), seed)
                    .unwrap()
                    .into_handle()
            })
            .collect();
        let norms: Vec<f64> = fields.iter().map(|f| f.norm2()).collect();

        let bound = validate_and_bind::<MatrixSinglet<f64, 4>>(
            &g,
            LinkFields::try_from(fields).unwrap(),
        )
        .unwrap();
        for (slot, lattice) in bound.iter().enumerate() {
            assert_eq!(lattice.norm2(), norms[slot]);
        }
    }
}
