// crates/mg_runtime/src/stencil.rs

//! 最近邻模板几何
//!
//! 粗化算子的链接场按模板点编号：`nd` 维网格上共 `2*nd + 1` 个点，
//! 槽位 `2*d` 为方向 `d` 的 `+1` 位移，槽位 `2*d+1` 为 `-1` 位移，
//! 最后一个槽位是自耦合项。四维网格对应 9 个链接槽位。

use std::fmt;

use crate::error::{RuntimeError, RuntimeResult};

/// 单个模板点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilPoint {
    /// 方向（自耦合项为 0）
    pub direction: usize,
    /// 位移：+1、-1 或 0
    pub displacement: i32,
}

impl StencilPoint {
    /// 是否为自耦合项
    pub fn is_self_coupling(&self) -> bool {
        self.displacement == 0
    }
}

impl fmt::Display for StencilPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.displacement {
            0 => write!(f, "self"),
            d if d > 0 => write!(f, "+{}", self.direction),
            _ => write!(f, "-{}", self.direction),
        }
    }
}

/// 模板几何
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    nd: usize,
    points: Vec<StencilPoint>,
}

impl Geometry {
    /// 为 `nd` 维网格创建模板
    pub fn new(nd: usize) -> Self {
        let mut points = Vec::with_capacity(2 * nd + 1);
        for d in 0..nd {
            points.push(StencilPoint { direction: d, displacement: 1 });
            points.push(StencilPoint { direction: d, displacement: -1 });
        }
        points.push(StencilPoint { direction: 0, displacement: 0 });
        Self { nd, points }
    }

    /// 维数
    pub fn nd(&self) -> usize {
        self.nd
    }

    /// 模板点数
    pub fn npoint(&self) -> usize {
        self.points.len()
    }

    /// 自耦合项所在槽位
    pub fn self_slot(&self) -> usize {
        self.points.len() - 1
    }

    /// 所有模板点
    pub fn points(&self) -> &[StencilPoint] {
        &self.points
    }

    /// 槽位对应的模板点
    pub fn point(&self, slot: usize) -> RuntimeResult<StencilPoint> {
        self.points.get(slot).copied().ok_or(RuntimeError::IndexOutOfBounds {
            index_type: "stencil slot",
            index: slot,
            len: self.points.len(),
        })
    }

    /// 由方向和位移查找槽位
    pub fn slot_of(&self, direction: usize, displacement: i32) -> Option<usize> {
        if displacement == 0 {
            return Some(self.self_slot());
        }
        self.points
            .iter()
            .position(|p| p.direction == direction && p.displacement == displacement)
    }

    /// 反方向槽位（自耦合项返回自身）
    pub fn opposite(&self, slot: usize) -> Option<usize> {
        let p = self.points.get(slot)?;
        self.slot_of(p.direction, -p.displacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_dimensional_layout() {
        let geom = Geometry::new(4);
        assert_eq!(geom.npoint(), 9);
        assert_eq!(geom.self_slot(), 8);
        assert_eq!(geom.point(0).unwrap(), StencilPoint { direction: 0, displacement: 1 });
        assert_eq!(geom.point(7).unwrap(), StencilPoint { direction: 3, displacement: -1 });
        assert!(geom.point(8).unwrap().is_self_coupling());
        assert!(geom.point(9).is_err());
    }

    #[test]
    fn test_slot_lookup() {
        let geom = Geometry::new(4);
        assert_eq!(geom.slot_of(2, 1), Some(4));
        assert_eq!(geom.slot_of(2, -1), Some(5));
        assert_eq!(geom.slot_of(5, 1), None);
        assert_eq!(geom.opposite(4), Some(5));
        assert_eq!(geom.opposite(8), Some(8));
    }

    #[test]
    fn test_display() {
        let geom = Geometry::new(4);
        let names: Vec<String> = geom.points().iter().map(|p| p.to_string()).collect();
        assert_eq!(names[0], "+0");
        assert_eq!(names[3], "-1");
        assert_eq!(names[8], "self");
    }
}
