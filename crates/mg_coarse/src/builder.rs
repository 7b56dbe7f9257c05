// crates/mg_coarse/src/builder.rs

//! 粗化算子构建器
//!
//! 无泛型参数到泛型特化的桥梁：
//!
//! ```text
//! CoarseOperatorConfig ──> CoarseOperatorBuilder ──> CoarseOperatorRequest
//!                                                        │
//!                                  basis::lookup(nbasis) ▼ (UnknownBasisSize)
//!                                  grid.precision()      ▼ f32 / f64 工厂
//!                                  select_and_build      ▼ level == 0 ? SpinColourVector : VectorSinglet<N>
//!                                  validate_and_bind     ▼ (TypeMismatch / GridMismatch)
//!                                  CoarseOperatorWrapper ▼
//!                                              Box<dyn DynCoarseOperator>
//! ```
//!
//! 每次构建只走一遍上述流程，要么得到完整绑定的句柄，要么得到错误。

use std::sync::Arc;

use mg_config::{CoarseOperatorConfig, CoarseOperatorHandle, LinkConfig, LinkFillKind};
use mg_runtime::{Geometry, GridCartesian, LatticeHandle};
use tracing::{debug, warn};

use crate::basis;
use crate::error::BuildError;
use crate::links::{LinkFields, NUM_LINKS};

/// 链接场填充方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFill {
    /// 全零
    Zero,
    /// 以种子生成的随机场
    Random {
        /// 随机种子
        seed: u64,
    },
}

impl From<LinkConfig> for LinkFill {
    fn from(config: LinkConfig) -> Self {
        match config.fill {
            LinkFillKind::Zero => LinkFill::Zero,
            LinkFillKind::Random => LinkFill::Random { seed: config.seed },
        }
    }
}

/// 一次构建调用的完整参数
#[derive(Debug)]
pub struct CoarseOperatorRequest {
    /// 粗网格
    pub grid: Arc<GridCartesian>,
    /// 厄米性标志
    pub make_hermitian: bool,
    /// 层级编号，0 为最细层
    pub level: usize,
    /// 基向量个数
    pub nbasis: usize,
    /// 按槽位排列的链接场，构建时移入算子
    pub links: LinkFields,
}

/// 构建粗化算子
pub fn build_coarse_operator(
    request: CoarseOperatorRequest,
) -> Result<CoarseOperatorHandle, BuildError> {
    let result = dispatch(request);
    if let Err(e) = &result {
        warn!(error = %e, "coarse operator construction failed");
    }
    result
}

fn dispatch(request: CoarseOperatorRequest) -> Result<CoarseOperatorHandle, BuildError> {
    let entry = basis::lookup(request.nbasis)?;
    check_grid(&request.grid)?;

    let precision = request.grid.precision();
    debug!(nbasis = entry.nbasis, %precision, "basis size dispatched");

    (entry.factories(precision).build)(request)
}

fn check_grid(grid: &GridCartesian) -> Result<(), BuildError> {
    let npoint = Geometry::new(grid.nd()).npoint();
    if npoint != NUM_LINKS {
        return Err(BuildError::InvalidGrid(format!(
            "{}-dimensional grid has {} stencil points, {} links required",
            grid.nd(),
            npoint,
            NUM_LINKS
        )));
    }
    Ok(())
}

/// 为给定网格和基向量个数创建一个正确类型的链接场
///
/// 精度取自网格。
pub fn create_link_field(
    grid: &Arc<GridCartesian>,
    nbasis: usize,
    fill: LinkFill,
) -> Result<LatticeHandle, BuildError> {
    let entry = basis::lookup(nbasis)?;
    (entry.factories(grid.precision()).create_link)(grid.clone(), fill)
        .map_err(|e| BuildError::InvalidGrid(e.to_string()))
}

/// 创建全部 9 个链接场，随机填充时第 `i` 个槽位使用种子 `seed + i`
pub fn create_link_fields(
    grid: &Arc<GridCartesian>,
    nbasis: usize,
    fill: LinkFill,
) -> Result<LinkFields, BuildError> {
    let fields = (0..NUM_LINKS)
        .map(|slot| {
            let fill = match fill {
                LinkFill::Zero => LinkFill::Zero,
                LinkFill::Random { seed } => LinkFill::Random {
                    seed: seed.wrapping_add(slot as u64),
                },
            };
            create_link_field(grid, nbasis, fill)
        })
        .collect::<Result<Vec<_>, _>>()?;
    LinkFields::try_from(fields)
}

/// 粗化算子构建器
///
/// # 示例
///
/// ```
/// use mg_coarse::{create_link_fields, CoarseOperatorBuilder, DynCoarseOperator, LinkFill};
/// use mg_runtime::{GridCartesian, Precision};
///
/// let grid = GridCartesian::shared(vec![2, 2, 2, 2], Precision::F64).unwrap();
/// let links = create_link_fields(&grid, 8, LinkFill::Zero).unwrap();
///
/// let op = CoarseOperatorBuilder::new(grid)
///     .nbasis(8)
///     .level(1)
///     .hermitian(true)
///     .with_links(links)
///     .build()
///     .unwrap();
///
/// assert_eq!(op.nbasis(), 8);
/// assert!(op.is_hermitian());
/// ```
#[derive(Debug)]
pub struct CoarseOperatorBuilder {
    grid: Arc<GridCartesian>,
    make_hermitian: bool,
    level: Option<usize>,
    nbasis: Option<usize>,
    links: Option<LinkFields>,
}

impl CoarseOperatorBuilder {
    /// 创建构建器
    pub fn new(grid: Arc<GridCartesian>) -> Self {
        Self {
            grid,
            make_hermitian: false,
            level: None,
            nbasis: None,
            links: None,
        }
    }

    /// 从配置创建构建器（不含链接场）
    pub fn from_config(config: &CoarseOperatorConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let grid = config.build_grid()?;
        Ok(Self::new(grid)
            .hermitian(config.make_hermitian)
            .level(config.level)
            .nbasis(config.nbasis))
    }

    /// 设置厄米性标志
    pub fn hermitian(mut self, make_hermitian: bool) -> Self {
        self.make_hermitian = make_hermitian;
        self
    }

    /// 设置层级
    pub fn level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// 设置基向量个数
    pub fn nbasis(mut self, nbasis: usize) -> Self {
        self.nbasis = Some(nbasis);
        self
    }

    /// 设置链接场
    pub fn with_links(mut self, links: LinkFields) -> Self {
        self.links = Some(links);
        self
    }

    /// 按当前网格和基向量个数生成链接场
    pub fn with_generated_links(self, fill: LinkFill) -> Result<Self, BuildError> {
        let nbasis = self.require_nbasis()?;
        let links = create_link_fields(&self.grid, nbasis, fill)?;
        Ok(self.with_links(links))
    }

    /// 粗网格
    pub fn grid(&self) -> &Arc<GridCartesian> {
        &self.grid
    }

    fn require_nbasis(&self) -> Result<usize, BuildError> {
        self.nbasis
            .ok_or_else(|| BuildError::InvalidParameter("missing parameter 'nbasis'".to_string()))
    }

    /// 构建算子
    pub fn build(self) -> Result<CoarseOperatorHandle, BuildError> {
        let nbasis = self.require_nbasis()?;
        let level = self
            .level
            .ok_or_else(|| BuildError::InvalidParameter("missing parameter 'level'".to_string()))?;
        let links = self
            .links
            .ok_or_else(|| BuildError::InvalidParameter("missing parameter 'A'".to_string()))?;

        build_coarse_operator(CoarseOperatorRequest {
            grid: self.grid,
            make_hermitian: self.make_hermitian,
            level,
            nbasis,
            links,
        })
    }
}
