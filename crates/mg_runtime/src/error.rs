// crates/mg_runtime/src/error.rs

//! 运行时错误类型
//!
//! 网格与格点场存储层的错误。

/// 运行时错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// 格点索引越界
    #[error("{index_type}({index}) out of bounds, length is {len}")]
    IndexOutOfBounds {
        /// 索引类型名称
        index_type: &'static str,
        /// 索引值
        index: usize,
        /// 容量
        len: usize,
    },

    /// 缓冲区大小不匹配
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch {
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 网格维度无效
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

/// 运行时结果类型
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuntimeError::BufferSizeMismatch { expected: 16, actual: 3 };
        assert_eq!(err.to_string(), "buffer size mismatch: expected 16, got 3");
    }
}
