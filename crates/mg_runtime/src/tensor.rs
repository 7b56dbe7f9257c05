// crates/mg_runtime/src/tensor.rs

//! 张量元素类型
//!
//! 格点场每个格点上存放的代数对象。编译期由零大小的标记类型表示
//! （[`Singlet`], [`VectorSinglet`], [`MatrixSinglet`], [`SpinColourVector`]），
//! 运行时由 [`ElementType`] 描述符表示。两者通过 [`TensorElement::element_type`]
//! 对应，类型擦除的场句柄依靠该描述符做兼容性检查。
//!
//! 数据布局统一为每格点 `NCOMPLEX` 个复数，按行优先展开。

use std::fmt;
use std::marker::PhantomData;

use crate::precision::Precision;
use crate::scalar::RuntimeScalar;

/// 自旋分量数
pub const NS: usize = 4;
/// 色分量数
pub const NC: usize = 3;

/// 代数形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 复数标量
    Singlet,
    /// 长度为 n 的内部向量（粗格点上的向量）
    VectorSinglet(usize),
    /// n×n 内部矩阵（粗格点上的链接）
    MatrixSinglet(usize),
    /// 自旋-色向量（最细层的物理向量）
    SpinColourVector,
}

impl ElementKind {
    /// 每格点复数分量数
    pub fn n_complex(&self) -> usize {
        match *self {
            ElementKind::Singlet => 1,
            ElementKind::VectorSinglet(n) => n,
            ElementKind::MatrixSinglet(n) => n * n,
            ElementKind::SpinColourVector => NS * NC,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Singlet => write!(f, "ot_singlet"),
            ElementKind::VectorSinglet(n) => write!(f, "ot_vector_singlet({})", n),
            ElementKind::MatrixSinglet(n) => write!(f, "ot_matrix_singlet({})", n),
            ElementKind::SpinColourVector => write!(f, "ot_vector_spin_color({},{})", NS, NC),
        }
    }
}

/// 运行时元素类型描述符
///
/// 形状与精度共同决定类型；两者都相同时才算同一元素类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType {
    /// 代数形状
    pub kind: ElementKind,
    /// 数值精度
    pub precision: Precision,
}

impl ElementType {
    /// 创建描述符
    pub const fn new(kind: ElementKind, precision: Precision) -> Self {
        Self { kind, precision }
    }

    /// 每格点复数分量数
    pub fn n_complex(&self) -> usize {
        self.kind.n_complex()
    }

    /// 每格点字节数
    pub fn site_bytes(&self) -> usize {
        self.n_complex() * self.precision.complex_bytes()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.kind, self.precision)
    }
}

/// 编译期张量元素
///
/// 实现者都是零大小的标记类型，真正的数据存放在 [`Lattice`](crate::Lattice) 中。
pub trait TensorElement: Send + Sync + 'static {
    /// 底层实数类型
    type Scalar: RuntimeScalar;
    /// 每格点复数分量数
    const NCOMPLEX: usize;

    /// 运行时描述符
    fn element_type() -> ElementType;
}

/// 复数标量
pub struct Singlet<S>(PhantomData<S>);

/// 长度为 `N` 的粗格点向量
pub struct VectorSinglet<S, const N: usize>(PhantomData<S>);

/// `N×N` 粗格点矩阵
pub struct MatrixSinglet<S, const N: usize>(PhantomData<S>);

/// 自旋-色向量
pub struct SpinColourVector<S>(PhantomData<S>);

impl<S: RuntimeScalar> TensorElement for Singlet<S> {
    type Scalar = S;
    const NCOMPLEX: usize = 1;

    fn element_type() -> ElementType {
        ElementType::new(ElementKind::Singlet, S::PRECISION)
    }
}

impl<S: RuntimeScalar, const N: usize> TensorElement for VectorSinglet<S, N> {
    type Scalar = S;
    const NCOMPLEX: usize = N;

    fn element_type() -> ElementType {
        ElementType::new(ElementKind::VectorSinglet(N), S::PRECISION)
    }
}

impl<S: RuntimeScalar, const N: usize> TensorElement for MatrixSinglet<S, N> {
    type Scalar = S;
    const NCOMPLEX: usize = N * N;

    fn element_type() -> ElementType {
        ElementType::new(ElementKind::MatrixSinglet(N), S::PRECISION)
    }
}

impl<S: RuntimeScalar> TensorElement for SpinColourVector<S> {
    type Scalar = S;
    const NCOMPLEX: usize = NS * NC;

    fn element_type() -> ElementType {
        ElementType::new(ElementKind::SpinColourVector, S::PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_matches_marker() {
        assert_eq!(
            MatrixSinglet::<f64, 8>::element_type(),
            ElementType::new(ElementKind::MatrixSinglet(8), Precision::F64)
        );
        assert_eq!(MatrixSinglet::<f32, 8>::NCOMPLEX, 64);
        assert_eq!(VectorSinglet::<f32, 12>::NCOMPLEX, 12);
        assert_eq!(SpinColourVector::<f64>::NCOMPLEX, 12);
    }

    #[test]
    fn test_precision_distinguishes_types() {
        assert_ne!(
            MatrixSinglet::<f32, 4>::element_type(),
            MatrixSinglet::<f64, 4>::element_type()
        );
        assert_ne!(
            MatrixSinglet::<f64, 4>::element_type(),
            MatrixSinglet::<f64, 6>::element_type()
        );
    }

    #[test]
    fn test_display() {
        let t = MatrixSinglet::<f64, 8>::element_type();
        assert_eq!(t.to_string(), "ot_matrix_singlet(8)<f64>");
        assert_eq!(
            SpinColourVector::<f32>::element_type().to_string(),
            "ot_vector_spin_color(4,3)<f32>"
        );
    }

    #[test]
    fn test_site_bytes() {
        let t = ElementType::new(ElementKind::MatrixSinglet(4), Precision::F32);
        assert_eq!(t.site_bytes(), 16 * 8);
        assert_eq!(Singlet::<f64>::element_type().site_bytes(), 16);
    }
}
