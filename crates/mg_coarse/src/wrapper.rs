// crates/mg_coarse/src/wrapper.rs

//! 算子包装
//!
//! [`CoarsenedOperator`] 是具体特化的带类型视图；[`CoarseOperatorWrapper`]
//! 独占一个特化实例，并把它的编译期参数（基向量个数、精度、细向量类型）
//! 擦除为 [`DynCoarseOperator`]。包装器只提供只读访问。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use mg_config::DynCoarseOperator;
use mg_runtime::{
    ElementType, Geometry, GridCartesian, LatticeField, Precision, RuntimeScalar, StencilPoint,
    TensorElement,
};

/// 具体特化的带类型接口
pub trait CoarsenedOperator: fmt::Debug + Send + Sync + 'static {
    /// 细向量元素类型
    type Fine: TensorElement;
    /// 实数精度
    type Scalar: RuntimeScalar;
    /// 链接场元素类型
    type Link: TensorElement;
    /// 基向量个数
    const NBASIS: usize;
    /// 实现名称
    const NAME: &'static str;

    /// 粗网格
    fn grid(&self) -> &Arc<GridCartesian>;

    /// 厄米性标志
    fn is_hermitian(&self) -> bool;

    /// 层级编号
    fn level(&self) -> usize;

    /// 模板几何
    fn geometry(&self) -> &Geometry;

    /// 槽位上的链接场
    fn link_field(&self, slot: usize) -> Option<&dyn LatticeField>;
}

/// 独占一个特化实例的包装器
pub struct CoarseOperatorWrapper<M: CoarsenedOperator> {
    inner: M,
}

impl<M: CoarsenedOperator> CoarseOperatorWrapper<M> {
    /// 接管实例
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// 被包装的实例
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// 取回实例
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: CoarsenedOperator> fmt::Debug for CoarseOperatorWrapper<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CoarseOperatorWrapper").field(&self.inner).finish()
    }
}

impl<M: CoarsenedOperator> DynCoarseOperator for CoarseOperatorWrapper<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn nbasis(&self) -> usize {
        M::NBASIS
    }

    fn precision(&self) -> Precision {
        <M::Scalar as RuntimeScalar>::PRECISION
    }

    fn level(&self) -> usize {
        self.inner.level()
    }

    fn is_hermitian(&self) -> bool {
        self.inner.is_hermitian()
    }

    fn grid(&self) -> &Arc<GridCartesian> {
        self.inner.grid()
    }

    fn fine_vector_type(&self) -> ElementType {
        M::Fine::element_type()
    }

    fn link_element_type(&self) -> ElementType {
        M::Link::element_type()
    }

    fn n_links(&self) -> usize {
        self.inner.geometry().npoint()
    }

    fn link(&self, slot: usize) -> Option<&dyn LatticeField> {
        self.inner.link_field(slot)
    }

    fn stencil_point(&self, slot: usize) -> Option<StencilPoint> {
        self.inner.geometry().point(slot).ok()
    }

    fn as_any(&self) -> &dyn Any {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coarsened::CoarsenedMatrix;
    use crate::links::NUM_LINKS;
    use mg_config::LevelClass;
    use mg_runtime::{ElementKind, Lattice, MatrixSinglet, SpinColourVector};

    type FinestMat = CoarsenedMatrix<SpinColourVector<f64>, f64, 4>;

    fn wrapped() -> CoarseOperatorWrapper<FinestMat> {
        let grid = GridCartesian::shared(vec![2, 1, 1, 1], Precision::F64).unwrap();
        let links =
            std::array::from_fn(|_| Lattice::<MatrixSinglet<f64, 4>>::zeros(grid.clone()).unwrap());
        CoarseOperatorWrapper::new(FinestMat::from_links(grid, true, 0, links))
    }

    #[test]
    fn test_erased_metadata() {
        let op: Box<dyn DynCoarseOperator> = Box::new(wrapped());
        assert_eq!(op.name(), "CoarsenedMatrix");
        assert_eq!(op.nbasis(), 4);
        assert_eq!(op.precision(), Precision::F64);
        assert_eq!(op.level_class(), LevelClass::Finest);
        assert!(op.is_hermitian());
        assert_eq!(op.fine_vector_type().kind, ElementKind::SpinColourVector);
        assert_eq!(op.link_element_type().kind, ElementKind::MatrixSinglet(4));
        assert_eq!(op.n_links(), NUM_LINKS);
        assert_eq!(op.global_bytes(), NUM_LINKS * 2 * 16 * 16);
    }

    #[test]
    fn test_stencil_points() {
        let op = wrapped();
        assert_eq!(op.stencil_point(1).unwrap().displacement, -1);
        assert!(op.stencil_point(8).unwrap().is_self_coupling());
        assert!(op.stencil_point(9).is_none());
        assert!(op.link(9).is_none());
    }

    #[test]
    fn test_downcast_to_concrete() {
        let op: Box<dyn DynCoarseOperator> = Box::new(wrapped());
        let concrete = op.as_any().downcast_ref::<FinestMat>().unwrap();
        assert_eq!(concrete.links().len(), NUM_LINKS);
        assert!(op
            .as_any()
            .downcast_ref::<CoarsenedMatrix<SpinColourVector<f32>, f32, 4>>()
            .is_none());
    }

    #[test]
    fn test_summary() {
        let summary = wrapped().summary();
        assert_eq!(summary.grid, "2.1.1.1");
        assert_eq!(summary.link_element_type, "ot_matrix_singlet(4)<f64>");
        assert_eq!(summary.level_class, LevelClass::Finest);
    }
}
