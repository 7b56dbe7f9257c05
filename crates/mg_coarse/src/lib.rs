// crates/mg_coarse/src/lib.rs

//! Multigrid Coarse Operator Layer (Layer 3)
//!
//! 粗化算子的分发、检查与构建。本层全泛型：每个受支持的基向量个数 × 精度 ×
//! 层级类别都单态化为一个 `CoarsenedMatrix<Fine, S, N>`，构建器在运行时
//! 选出其中一个并以 `Box<dyn DynCoarseOperator>` 返回。
//!
//! # 模块概览
//!
//! - [`basis`]: 基向量个数分发表
//! - [`selector`]: 精度/层级到细向量类型的选择
//! - [`compat`]: 链接场兼容性检查与绑定
//! - [`coarsened`]: CoarsenedMatrix 特化实例
//! - [`wrapper`]: 类型擦除包装
//! - [`builder`]: 构建入口
//! - [`links`]: 9 个链接场的定长集合
//! - [`error`]: 构建错误
//!
//! # 链接场所有权
//!
//! 链接场按值移入算子，构建成功后由算子独占；构建失败时随 `LinkFields`
//! 一起释放。算子之间不共享任何链接存储。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod basis;
pub mod selector;
pub mod compat;
pub mod coarsened;
pub mod wrapper;
pub mod builder;
pub mod links;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出核心类型
pub use basis::{is_supported, SUPPORTED_BASIS_SIZES};
pub use builder::{
    build_coarse_operator, create_link_field, create_link_fields, CoarseOperatorBuilder,
    CoarseOperatorRequest, LinkFill,
};
pub use coarsened::CoarsenedMatrix;
pub use compat::compatible;
pub use error::BuildError;
pub use links::{LinkFields, NUM_LINKS};
pub use wrapper::{CoarseOperatorWrapper, CoarsenedOperator};

pub use mg_config::{CoarseOperatorHandle, DynCoarseOperator, LevelClass};
