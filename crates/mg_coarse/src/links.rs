// crates/mg_coarse/src/links.rs

//! 链接场集合
//!
//! 固定 9 个、按位置编号的链接场句柄。构建算子时整个集合按值移入，
//! 构建成功后由算子独占，构建失败时随错误一起释放；调用方不再持有这些场。

use std::fmt;

use mg_runtime::{LatticeField, LatticeHandle};

use crate::error::BuildError;

/// 链接数：四维网格上 8 个最近邻加 1 个自耦合项
pub const NUM_LINKS: usize = 9;

/// 按槽位排列的 9 个链接场
pub struct LinkFields([LatticeHandle; NUM_LINKS]);

impl LinkFields {
    /// 从定长数组创建
    pub fn new(fields: [LatticeHandle; NUM_LINKS]) -> Self {
        Self(fields)
    }

    /// 槽位上的场
    pub fn get(&self, slot: usize) -> Option<&dyn LatticeField> {
        self.0.get(slot).map(|f| &**f)
    }

    /// 按槽位顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &dyn LatticeField> + '_ {
        self.0.iter().map(|f| &**f)
    }

    /// 交换两个槽位
    ///
    /// # Panics
    ///
    /// 槽位越界时 panic。
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// 替换槽位上的场，返回原来的场
    pub fn replace(
        &mut self,
        slot: usize,
        field: LatticeHandle,
    ) -> Result<LatticeHandle, BuildError> {
        let target = self.0.get_mut(slot).ok_or_else(|| {
            BuildError::InvalidParameter(format!(
                "link slot {} out of range 0..{}",
                slot, NUM_LINKS
            ))
        })?;
        Ok(std::mem::replace(target, field))
    }

    /// 取出全部句柄
    pub fn into_inner(self) -> [LatticeHandle; NUM_LINKS] {
        self.0
    }
}

impl From<[LatticeHandle; NUM_LINKS]> for LinkFields {
    fn from(fields: [LatticeHandle; NUM_LINKS]) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<Vec<LatticeHandle>> for LinkFields {
    type Error = BuildError;

    fn try_from(fields: Vec<LatticeHandle>) -> Result<Self, Self::Error> {
        let n = fields.len();
        let fields: [LatticeHandle; NUM_LINKS] = fields.try_into().map_err(|_| {
            BuildError::InvalidParameter(format!("expected {} link fields, got {}", NUM_LINKS, n))
        })?;
        Ok(Self(fields))
    }
}

impl fmt::Debug for LinkFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|l| l.describe())).finish()
    }
}
