// crates/mg_coarse/src/basis.rs

//! 基向量个数分发
//!
//! 受支持的基向量个数是编译期固定的有限集合。每个取值在分发表中对应一条
//! [`BasisEntry`]，其中为两种精度各保存一组单态化的工厂函数。分发器按表中顺序
//! 逐项比较运行时的 `nbasis`，第一项匹配即选中；没有匹配时返回
//! [`BuildError::UnknownBasisSize`]，不做任何构建。
//!
//! 新增基向量个数只需修改 `basis_table!` 的参数列表。

use std::sync::Arc;

use mg_config::CoarseOperatorHandle;
use mg_runtime::{
    GridCartesian, Lattice, LatticeHandle, MatrixSinglet, Precision, RuntimeResult, RuntimeScalar,
};

use crate::builder::{CoarseOperatorRequest, LinkFill};
use crate::error::BuildError;
use crate::selector::{select_and_build, FinestLevelFineVec};

/// 构建某个特化的工厂函数
pub type BuildFn = fn(CoarseOperatorRequest) -> Result<CoarseOperatorHandle, BuildError>;

/// 创建某个特化所需链接场的工厂函数
pub type CreateLinkFn = fn(Arc<GridCartesian>, LinkFill) -> RuntimeResult<LatticeHandle>;

/// 一种精度下的工厂函数
#[derive(Debug, Clone, Copy)]
pub struct Factories {
    /// 构建算子
    pub build: BuildFn,
    /// 创建链接场
    pub create_link: CreateLinkFn,
}

/// 分发表中的一项
#[derive(Debug)]
pub struct BasisEntry {
    /// 基向量个数
    pub nbasis: usize,
    single: Factories,
    double: Factories,
}

impl BasisEntry {
    /// 按精度取工厂函数
    pub fn factories(&self, precision: Precision) -> &Factories {
        match precision {
            Precision::F32 => &self.single,
            Precision::F64 => &self.double,
        }
    }
}

fn create_link<S: RuntimeScalar, const N: usize>(
    grid: Arc<GridCartesian>,
    fill: LinkFill,
) -> RuntimeResult<LatticeHandle> {
    let lattice = match fill {
        LinkFill::Zero => Lattice::<MatrixSinglet<S, N>>::zeros(grid)?,
        LinkFill::Random { seed } => Lattice::<MatrixSinglet<S, N>>::random(grid, seed)?,
    };
    Ok(lattice.into_handle())
}

const fn factories<S: FinestLevelFineVec, const N: usize>() -> Factories {
    Factories {
        build: select_and_build::<S, N>,
        create_link: create_link::<S, N>,
    }
}

macro_rules! basis_table {
    ($($n:literal),+ $(,)?) => {
        /// 受支持的基向量个数（按分发顺序）
        pub const SUPPORTED_BASIS_SIZES: &[usize] = &[$($n),+];

        static BASIS_TABLE: &[BasisEntry] = &[
            $(
                BasisEntry {
                    nbasis: $n,
                    single: factories::<f32, $n>(),
                    double: factories::<f64, $n>(),
                },
            )+
        ];
    };
}

basis_table!(4, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 40, 48, 64);

/// 分发表
pub fn basis_table() -> &'static [BasisEntry] {
    BASIS_TABLE
}

/// 查找 `nbasis` 对应的表项
pub fn lookup(nbasis: usize) -> Result<&'static BasisEntry, BuildError> {
    BASIS_TABLE
        .iter()
        .find(|entry| entry.nbasis == nbasis)
        .ok_or(BuildError::UnknownBasisSize(nbasis))
}

/// `nbasis` 是否受支持
pub fn is_supported(nbasis: usize) -> bool {
    lookup(nbasis).is_ok()
}
