// crates/mg_runtime/src/scalar.rs

//! RuntimeScalar - 密封的标量类型抽象
//!
//! 粗化算子的每个特化都以标量类型为参数。只有 `f32` 和 `f64` 可以实现该 trait，
//! 从而保证精度集合在编译期是封闭的，与 [`Precision`] 的两个取值一一对应。
//!
//! ```rust
//! use mg_runtime::{Precision, RuntimeScalar};
//!
//! fn precision_of<S: RuntimeScalar>() -> Precision {
//!     S::PRECISION
//! }
//!
//! assert_eq!(precision_of::<f32>(), Precision::F32);
//! ```

use std::fmt::{Debug, Display};

use bytemuck::Pod;
use num_complex::Complex;
use num_traits::Float;

use crate::precision::Precision;

/// 密封模块，禁止外部实现
mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// 运行时标量类型（密封，仅 f32/f64 可实现）
///
/// - **允许**: 在算子层作为泛型约束 `<S: RuntimeScalar>`
/// - **禁止**: 在配置层和应用层出现泛型参数
/// - **禁止**: 作为 trait 对象使用
pub trait RuntimeScalar:
    private::Sealed
    + Pod
    + Float
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// 对应的运行时精度标签
    const PRECISION: Precision;
    /// 零值
    const ZERO: Self;

    /// 从配置层的 f64 转换（可能损失精度）
    fn from_f64_lossy(value: f64) -> Self;

    /// 提升到 f64
    fn widen(self) -> f64;

    /// 复数零
    #[inline]
    fn complex_zero() -> Complex<Self> {
        Complex::new(Self::ZERO, Self::ZERO)
    }

    /// 复数模平方，以 f64 累加
    #[inline]
    fn norm_sqr_wide(z: Complex<Self>) -> f64 {
        let re = z.re.widen();
        let im = z.im.widen();
        re * re + im * im
    }
}

impl RuntimeScalar for f32 {
    const PRECISION: Precision = Precision::F32;
    const ZERO: f32 = 0.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }
}

impl RuntimeScalar for f64 {
    const PRECISION: Precision = Precision::F64;
    const ZERO: f64 = 0.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_tags() {
        assert_eq!(f32::PRECISION, Precision::F32);
        assert_eq!(f64::PRECISION, Precision::F64);
    }

    #[test]
    fn test_lossy_conversion() {
        assert_eq!(f32::from_f64_lossy(0.5), 0.5f32);
        assert_eq!(f64::from_f64_lossy(0.1), 0.1f64);
        assert_eq!(2.5f32.widen(), 2.5f64);
    }

    #[test]
    fn test_norm_sqr_wide() {
        let z = Complex::new(3.0f32, 4.0f32);
        assert_eq!(f32::norm_sqr_wide(z), 25.0);
        assert_eq!(f64::norm_sqr_wide(f64::complex_zero()), 0.0);
    }
}
