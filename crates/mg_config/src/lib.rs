// crates/mg_config/src/lib.rs

//! Multigrid Config Layer (Layer 4)
//!
//! 配置层，提供粗化算子的构建参数和运行时多态接口。
//! 本层完全无泛型：精度由 `Precision` 枚举表示，基向量个数是普通整数，
//! 构建结果是 `Box<dyn DynCoarseOperator>`。
//!
//! # 模块概览
//!
//! - [`operator_config`]: CoarseOperatorConfig 构建参数（JSON）
//! - [`dyn_operator`]: DynCoarseOperator trait 与 LevelClass
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: mg_cli      ─> uses CoarseOperatorConfig, DynCoarseOperator
//! Layer 4: mg_config   ─> CoarseOperatorConfig, DynCoarseOperator (本层)
//! Layer 3: mg_coarse   ─> impl DynCoarseOperator for CoarseOperatorWrapper<M>
//! Layer 2: mg_runtime  ─> RuntimeScalar, Lattice<T>
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod operator_config;
pub mod dyn_operator;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 4;

// 重导出核心类型
pub use mg_runtime::Precision;
pub use operator_config::{CoarseOperatorConfig, GridConfig, LinkConfig, LinkFillKind};
pub use dyn_operator::{CoarseOperatorHandle, DynCoarseOperator, LevelClass, OperatorSummary};
pub use error::ConfigError;
