// crates/mg_runtime/src/lattice.rs

//! 格点场存储
//!
//! - [`Lattice<T>`]: 编译期确定元素类型的场，独占其数据
//! - [`LatticeField`]: 类型擦除的场接口，携带运行时 [`ElementType`] 标签
//! - [`LatticeHandle`]: `Box<dyn LatticeField>`，配置层和应用层传递场的唯一形式
//!
//! 类型擦除的句柄可以通过 [`LatticeField::as_any`] / [`LatticeField::into_any`]
//! 还原为具体的 `Lattice<T>`，调用方应先比较 [`LatticeField::element_type`]。

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{RuntimeError, RuntimeResult};
use crate::grid::GridCartesian;
use crate::scalar::RuntimeScalar;
use crate::tensor::{ElementType, TensorElement};

/// 低于此格点数时串行计算
const PARALLEL_THRESHOLD: usize = 4096;

/// 元素类型为 `T` 的格点场
pub struct Lattice<T: TensorElement> {
    grid: Arc<GridCartesian>,
    data: Vec<Complex<T::Scalar>>,
    _element: PhantomData<T>,
}

impl<T: TensorElement> Lattice<T> {
    /// 场数据长度 `gsites * NCOMPLEX`，字节数超出可分配范围时报错
    pub fn storage_len(grid: &GridCartesian) -> RuntimeResult<usize> {
        let elem_bytes = std::mem::size_of::<Complex<T::Scalar>>();
        grid.gsites()
            .checked_mul(T::NCOMPLEX)
            .filter(|len| {
                len.checked_mul(elem_bytes)
                    .map_or(false, |bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| {
                RuntimeError::InvalidGrid(format!(
                    "{} x {} does not fit in memory",
                    grid,
                    T::element_type()
                ))
            })
    }

    /// 创建零场
    pub fn zeros(grid: Arc<GridCartesian>) -> RuntimeResult<Self> {
        let len = Self::storage_len(&grid)?;
        Ok(Self {
            grid,
            data: vec![T::Scalar::complex_zero(); len],
            _element: PhantomData,
        })
    }

    /// 从已有数据创建，长度必须为 `gsites * NCOMPLEX`
    pub fn from_data(
        grid: Arc<GridCartesian>,
        data: Vec<Complex<T::Scalar>>,
    ) -> RuntimeResult<Self> {
        let expected = Self::storage_len(&grid)?;
        if data.len() != expected {
            return Err(RuntimeError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            grid,
            data,
            _element: PhantomData,
        })
    }

    /// 以固定种子填充 [-1, 1) 均匀分布的随机场
    pub fn random(grid: Arc<GridCartesian>, seed: u64) -> RuntimeResult<Self> {
        let len = Self::storage_len(&grid)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..len)
            .map(|_| {
                let re = rng.gen_range(-1.0..1.0);
                let im = rng.gen_range(-1.0..1.0);
                Complex::new(
                    T::Scalar::from_f64_lossy(re),
                    T::Scalar::from_f64_lossy(im),
                )
            })
            .collect();
        Ok(Self {
            grid,
            data,
            _element: PhantomData,
        })
    }

    /// 所在网格
    pub fn grid(&self) -> &Arc<GridCartesian> {
        &self.grid
    }

    /// 格点数
    pub fn n_sites(&self) -> usize {
        self.grid.gsites()
    }

    /// 全部数据（格点优先）
    pub fn data(&self) -> &[Complex<T::Scalar>] {
        &self.data
    }

    /// 全部数据（可写）
    pub fn data_mut(&mut self) -> &mut [Complex<T::Scalar>] {
        &mut self.data
    }

    /// 单个格点上的张量分量
    pub fn site(&self, site: usize) -> RuntimeResult<&[Complex<T::Scalar>]> {
        let range = self.site_range(site)?;
        Ok(&self.data[range])
    }

    /// 单个格点上的张量分量（可写）
    pub fn site_mut(&mut self, site: usize) -> RuntimeResult<&mut [Complex<T::Scalar>]> {
        let range = self.site_range(site)?;
        Ok(&mut self.data[range])
    }

    fn site_range(&self, site: usize) -> RuntimeResult<std::ops::Range<usize>> {
        let n_sites = self.n_sites();
        if site >= n_sites {
            return Err(RuntimeError::IndexOutOfBounds {
                index_type: "site",
                index: site,
                len: n_sites,
            });
        }
        let start = site * T::NCOMPLEX;
        Ok(start..start + T::NCOMPLEX)
    }

    /// 模平方之和
    pub fn norm2(&self) -> f64 {
        if self.data.len() < PARALLEL_THRESHOLD {
            self.data.iter().map(|z| T::Scalar::norm_sqr_wide(*z)).sum()
        } else {
            self.data
                .par_iter()
                .map(|z| T::Scalar::norm_sqr_wide(*z))
                .sum()
        }
    }

    /// 转换为类型擦除的句柄
    pub fn into_handle(self) -> LatticeHandle {
        Box::new(self)
    }
}

impl<T: TensorElement> fmt::Debug for Lattice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lattice")
            .field("element_type", &T::element_type())
            .field("grid", &self.grid)
            .field("len", &self.data.len())
            .finish()
    }
}

/// 类型擦除的格点场
///
/// 兼容性检查只读访问句柄，不会修改场内容。
pub trait LatticeField: Send + Sync + fmt::Debug {
    /// 实际存放的元素类型
    fn element_type(&self) -> ElementType;

    /// 所在网格
    fn grid(&self) -> &Arc<GridCartesian>;

    /// 向下转型入口
    fn as_any(&self) -> &dyn Any;

    /// 转移所有权的向下转型入口
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// 原始字节视图
    fn as_bytes(&self) -> &[u8];

    /// 模平方之和
    fn norm2(&self) -> f64;

    /// 全局字节数
    fn global_bytes(&self) -> usize {
        self.grid().gsites() * self.element_type().site_bytes()
    }

    /// 可用于重建的描述，例如 `ot_matrix_singlet(8)<f64>;4.4.4.4`
    fn describe(&self) -> String {
        format!("{};{}", self.element_type(), self.grid().describe())
    }
}

/// 类型擦除的场句柄
pub type LatticeHandle = Box<dyn LatticeField>;

impl<T: TensorElement> LatticeField for Lattice<T> {
    fn element_type(&self) -> ElementType {
        T::element_type()
    }

    fn grid(&self) -> &Arc<GridCartesian> {
        &self.grid
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    fn norm2(&self) -> f64 {
        Lattice::norm2(self)
    }
}
