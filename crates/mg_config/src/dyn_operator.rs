// crates/mg_config/src/dyn_operator.rs

//! DynCoarseOperator - 运行时多态的粗化算子接口
//!
//! 所有特化（基向量个数 × 精度 × 层级）都通过本 trait 以同一种形式交给调用方，
//! 调用方不需要知道构建时选中了哪个特化。句柄独占底层实例，释放句柄即释放实例。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use mg_runtime::{ElementType, GridCartesian, LatticeField, Precision, StencilPoint};
use serde::{Deserialize, Serialize};

/// 层级类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelClass {
    /// 最细层（level = 0），细向量为自旋-色向量
    Finest,
    /// 任意更粗的层（level > 0），细向量为粗格点向量
    Coarse,
}

impl LevelClass {
    /// 由层级编号得到类别
    pub fn of(level: usize) -> Self {
        if level == 0 {
            LevelClass::Finest
        } else {
            LevelClass::Coarse
        }
    }
}

impl fmt::Display for LevelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelClass::Finest => write!(f, "finest"),
            LevelClass::Coarse => write!(f, "coarse"),
        }
    }
}

/// 算子摘要（全部为运行时值，可直接序列化输出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSummary {
    /// 实现名称
    pub name: String,
    /// 基向量个数
    pub nbasis: usize,
    /// 精度
    pub precision: Precision,
    /// 层级编号
    pub level: usize,
    /// 层级类别
    pub level_class: LevelClass,
    /// 厄米性标志
    pub hermitian: bool,
    /// 网格描述
    pub grid: String,
    /// 细向量元素类型
    pub fine_vector_type: String,
    /// 链接场元素类型
    pub link_element_type: String,
    /// 链接数
    pub n_links: usize,
    /// 链接场总字节数
    pub global_bytes: usize,
}

/// 运行时粗化算子接口（无泛型）
///
/// 本层只暴露构建结果的只读信息，数值核（模板作用、投影等）不在此接口中。
///
/// # 示例
///
/// ```ignore
/// let op = CoarseOperatorBuilder::new(grid)
///     .nbasis(12)
///     .level(1)
///     .with_links(links)
///     .build()?;
/// println!("{} (nbasis = {})", op.name(), op.nbasis());
/// ```
pub trait DynCoarseOperator: Send + Sync + fmt::Debug {
    /// 实现名称
    fn name(&self) -> &'static str;

    /// 基向量个数
    fn nbasis(&self) -> usize;

    /// 使用的精度
    fn precision(&self) -> Precision;

    /// 层级编号（0 为最细层）
    fn level(&self) -> usize;

    /// 层级类别
    fn level_class(&self) -> LevelClass {
        LevelClass::of(self.level())
    }

    /// 构建时给定的厄米性标志
    fn is_hermitian(&self) -> bool;

    /// 粗网格
    fn grid(&self) -> &Arc<GridCartesian>;

    /// 细向量元素类型
    fn fine_vector_type(&self) -> ElementType;

    /// 链接场元素类型
    fn link_element_type(&self) -> ElementType;

    /// 链接数
    fn n_links(&self) -> usize;

    /// 槽位上的链接场
    fn link(&self, slot: usize) -> Option<&dyn LatticeField>;

    /// 槽位对应的模板点
    fn stencil_point(&self, slot: usize) -> Option<StencilPoint>;

    /// 向下转型入口，用于取回具体特化
    fn as_any(&self) -> &dyn Any;

    /// 链接场总字节数
    fn global_bytes(&self) -> usize {
        (0..self.n_links())
            .filter_map(|slot| self.link(slot))
            .map(|l| l.global_bytes())
            .sum()
    }

    /// 摘要
    fn summary(&self) -> OperatorSummary {
        OperatorSummary {
            name: self.name().to_string(),
            nbasis: self.nbasis(),
            precision: self.precision(),
            level: self.level(),
            level_class: self.level_class(),
            hermitian: self.is_hermitian(),
            grid: self.grid().describe(),
            fine_vector_type: self.fine_vector_type().to_string(),
            link_element_type: self.link_element_type().to_string(),
            n_links: self.n_links(),
            global_bytes: self.global_bytes(),
        }
    }
}

/// 类型擦除的算子句柄
pub type CoarseOperatorHandle = Box<dyn DynCoarseOperator>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_class() {
        assert_eq!(LevelClass::of(0), LevelClass::Finest);
        assert_eq!(LevelClass::of(1), LevelClass::Coarse);
        assert_eq!(LevelClass::of(7), LevelClass::Coarse);
        assert_eq!(LevelClass::Coarse.to_string(), "coarse");
    }

    #[test]
    fn test_level_class_serde() {
        let json = serde_json::to_string(&LevelClass::Finest).unwrap();
        assert_eq!(json, "\"finest\"");
    }
}
