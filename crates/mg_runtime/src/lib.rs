// crates/mg_runtime/src/lib.rs

//! Multigrid Runtime Layer (Layer 2)
//!
//! 运行时抽象层，提供粗化算子所需的标量、张量元素、网格和格点场抽象。
//!
//! # 模块概览
//!
//! - [`precision`]: Precision 枚举（F32/F64）
//! - [`scalar`]: RuntimeScalar trait（密封，仅 f32/f64 可实现）
//! - [`tensor`]: 张量元素标记类型与运行时 ElementType 描述符
//! - [`grid`]: GridCartesian 笛卡尔网格
//! - [`lattice`]: `Lattice<T>` 存储与类型擦除的 LatticeField 句柄
//! - [`stencil`]: 最近邻模板几何（链接槽位编号）
//! - [`error`]: 运行时错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: mg_cli      ─> CoarseOperatorConfig, Box<dyn DynCoarseOperator>
//! Layer 4: mg_config   ─> CoarseOperatorConfig, DynCoarseOperator
//! Layer 3: mg_coarse   ─> CoarsenedMatrix<Fine, S, N>
//! Layer 2: mg_runtime  ─> RuntimeScalar, Lattice<T>, LatticeField (本层)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod precision;
pub mod scalar;
pub mod tensor;
pub mod grid;
pub mod lattice;
pub mod stencil;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use precision::{Precision, PrecisionParseError};
pub use scalar::RuntimeScalar;
pub use tensor::{
    ElementKind, ElementType, MatrixSinglet, Singlet, SpinColourVector, TensorElement,
    VectorSinglet,
};
pub use grid::GridCartesian;
pub use lattice::{Lattice, LatticeField, LatticeHandle};
pub use stencil::{Geometry, StencilPoint};
pub use error::{RuntimeError, RuntimeResult};

pub use num_complex::Complex;

/// Prelude 模块
pub mod prelude {
    //! 常用类型预导入
    pub use crate::{
        Complex, ElementType, GridCartesian, Lattice, LatticeField, LatticeHandle, Precision,
        RuntimeError, RuntimeScalar, TensorElement,
    };
}
