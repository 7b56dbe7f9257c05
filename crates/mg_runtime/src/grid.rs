// crates/mg_runtime/src/grid.rs

//! 笛卡尔网格
//!
//! 粗化层级上的格点网格描述。网格本身不持有数据，只记录全局维度和精度；
//! 场通过 `Arc<GridCartesian>` 共享同一个网格。跨进程划分不在本层处理。

use std::fmt;
use std::sync::Arc;

use crate::error::{RuntimeError, RuntimeResult};
use crate::precision::Precision;

/// 笛卡尔网格
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridCartesian {
    fdimensions: Vec<usize>,
    gsites: usize,
    precision: Precision,
}

impl GridCartesian {
    /// 创建网格
    ///
    /// 维度不能为空，每个方向至少一个格点，且全局格点数不能溢出 `usize`。
    pub fn new(fdimensions: Vec<usize>, precision: Precision) -> RuntimeResult<Self> {
        if fdimensions.is_empty() {
            return Err(RuntimeError::InvalidGrid("grid has no dimensions".to_string()));
        }
        if let Some(d) = fdimensions.iter().position(|&n| n == 0) {
            return Err(RuntimeError::InvalidGrid(format!(
                "dimension {} has zero extent",
                d
            )));
        }
        let gsites = fdimensions
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| {
                RuntimeError::InvalidGrid(format!("site count of {:?} overflows", fdimensions))
            })?;
        Ok(Self {
            fdimensions,
            gsites,
            precision,
        })
    }

    /// 创建共享网格
    pub fn shared(fdimensions: Vec<usize>, precision: Precision) -> RuntimeResult<Arc<Self>> {
        Self::new(fdimensions, precision).map(Arc::new)
    }

    /// 全局维度
    pub fn fdimensions(&self) -> &[usize] {
        &self.fdimensions
    }

    /// 维数
    pub fn nd(&self) -> usize {
        self.fdimensions.len()
    }

    /// 全局格点数
    pub fn gsites(&self) -> usize {
        self.gsites
    }

    /// 网格精度
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// 两个网格是否可以互相赋值
    pub fn is_conformable(&self, other: &GridCartesian) -> bool {
        self == other
    }

    /// 无空格的描述字符串，例如 `4.4.4.8`
    pub fn describe(&self) -> String {
        self.fdimensions
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for GridCartesian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid({};{})", self.describe(), self.precision.lattice_name())
    }
}
