// crates/mg_coarse/src/coarsened.rs

//! 粗化矩阵
//!
//! `CoarsenedMatrix<Fine, S, N>` 是某一层级上的粗化算子特化：
//! - `Fine`: 该层细向量的元素类型（由选择器决定）
//! - `S`: 实数精度
//! - `N`: 基向量个数
//!
//! 实例独占网格引用、厄米性标志以及 9 个 `MatrixSinglet<S, N>` 链接场。
//! 链接场的元素类型只在构建时检查一次，之后由类型系统保证。

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use mg_config::CoarseOperatorHandle;
use mg_runtime::{
    Geometry, GridCartesian, Lattice, LatticeField, MatrixSinglet, RuntimeScalar, TensorElement,
};
use tracing::info;

use crate::builder::CoarseOperatorRequest;
use crate::compat::validate_and_bind;
use crate::error::BuildError;
use crate::links::NUM_LINKS;
use crate::wrapper::{CoarseOperatorWrapper, CoarsenedOperator};

/// 粗化矩阵
pub struct CoarsenedMatrix<Fine, S: RuntimeScalar, const N: usize> {
    grid: Arc<GridCartesian>,
    hermitian: bool,
    level: usize,
    geometry: Geometry,
    links: [Lattice<MatrixSinglet<S, N>>; NUM_LINKS],
    _fine: PhantomData<Fine>,
}

impl<Fine, S, const N: usize> CoarsenedMatrix<Fine, S, N>
where
    Fine: TensorElement<Scalar = S>,
    S: RuntimeScalar,
{
    /// 由已检查的链接场创建
    ///
    /// `hermitian` 原样保存。
    pub fn from_links(
        grid: Arc<GridCartesian>,
        hermitian: bool,
        level: usize,
        links: [Lattice<MatrixSinglet<S, N>>; NUM_LINKS],
    ) -> Self {
        let geometry = Geometry::new(grid.nd());
        Self {
            grid,
            hermitian,
            level,
            geometry,
            links,
            _fine: PhantomData,
        }
    }

    /// 粗网格
    pub fn grid(&self) -> &Arc<GridCartesian> {
        &self.grid
    }

    /// 厄米性标志
    pub fn is_hermitian(&self) -> bool {
        self.hermitian
    }

    /// 层级编号
    pub fn level(&self) -> usize {
        self.level
    }

    /// 模板几何
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// 全部链接场
    pub fn links(&self) -> &[Lattice<MatrixSinglet<S, N>>; NUM_LINKS] {
        &self.links
    }

    /// 槽位上的链接场
    pub fn link(&self, slot: usize) -> Option<&Lattice<MatrixSinglet<S, N>>> {
        self.links.get(slot)
    }

    /// 按方向和位移取链接场，位移为 0 时返回自耦合项
    pub fn link_for(
        &self,
        direction: usize,
        displacement: i32,
    ) -> Option<&Lattice<MatrixSinglet<S, N>>> {
        self.geometry
            .slot_of(direction, displacement)
            .and_then(|slot| self.links.get(slot))
    }

    /// 拆出链接场
    pub fn into_links(self) -> [Lattice<MatrixSinglet<S, N>>; NUM_LINKS] {
        self.links
    }
}

impl<Fine, S: RuntimeScalar, const N: usize> fmt::Debug for CoarsenedMatrix<Fine, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoarsenedMatrix")
            .field("nbasis", &N)
            .field("precision", &S::PRECISION)
            .field("grid", &self.grid)
            .field("hermitian", &self.hermitian)
            .field("level", &self.level)
            .finish()
    }
}

impl<Fine, S, const N: usize> CoarsenedOperator for CoarsenedMatrix<Fine, S, N>
where
    Fine: TensorElement<Scalar = S>,
    S: RuntimeScalar,
{
    type Fine = Fine;
    type Scalar = S;
    type Link = MatrixSinglet<S, N>;
    const NBASIS: usize = N;
    const NAME: &'static str = "CoarsenedMatrix";

    fn grid(&self) -> &Arc<GridCartesian> {
        &self.grid
    }

    fn is_hermitian(&self) -> bool {
        self.hermitian
    }

    fn level(&self) -> usize {
        self.level
    }

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn link_field(&self, slot: usize) -> Option<&dyn LatticeField> {
        self.links.get(slot).map(|l| l as &dyn LatticeField)
    }
}

/// 检查并绑定链接场，构建特化实例并包装为句柄
///
/// 所有槽位检查完毕后才开始绑定；任一槽位失败时不会产生实例。
pub(crate) fn construct<Fine, S, const N: usize>(
    request: CoarseOperatorRequest,
) -> Result<CoarseOperatorHandle, BuildError>
where
    Fine: TensorElement<Scalar = S>,
    S: RuntimeScalar,
{
    let CoarseOperatorRequest {
        grid,
        make_hermitian,
        level,
        links,
        ..
    } = request;

    let links = validate_and_bind::<MatrixSinglet<S, N>>(&grid, links)?;
    let matrix = CoarsenedMatrix::<Fine, S, N>::from_links(grid, make_hermitian, level, links);

    info!(
        nbasis = N,
        precision = %S::PRECISION,
        level,
        hermitian = make_hermitian,
        fine = %Fine::element_type(),
        "coarsened matrix constructed"
    );

    Ok(Box::new(CoarseOperatorWrapper::new(matrix)))
}
