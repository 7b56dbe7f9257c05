// crates/mg_config/src/operator_config.rs

//! CoarseOperatorConfig - 粗化算子构建参数
//!
//! 不含泛型的构建参数，可从 JSON 读写。`precision` 同时决定网格精度，
//! 构建时由算子层据此选择 f32 或 f64 特化。

use std::path::Path;
use std::sync::Arc;

use mg_runtime::{GridCartesian, Precision};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// 粗网格维数，对应 8 个最近邻链接加 1 个自耦合项
pub const REQUIRED_DIMENSIONS: usize = 4;

/// 粗化算子配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarseOperatorConfig {
    /// 计算精度
    #[serde(default)]
    pub precision: Precision,

    /// 粗网格
    #[serde(default)]
    pub grid: GridConfig,

    /// 是否要求算子满足厄米性，接受 `true`/`false` 或 `0`/`1`
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub make_hermitian: bool,

    /// 粗化层级，0 为最细层
    #[serde(default = "default_level")]
    pub level: usize,

    /// 基向量个数
    #[serde(default = "default_nbasis")]
    pub nbasis: usize,

    /// 链接场初始化方式
    #[serde(default)]
    pub links: LinkConfig,
}

fn default_level() -> usize { 1 }
fn default_nbasis() -> usize { 12 }

/// 网格配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// 全局维度
    #[serde(default = "default_fdimensions")]
    pub fdimensions: Vec<usize>,
}

fn default_fdimensions() -> Vec<usize> { vec![4, 4, 4, 4] }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            fdimensions: default_fdimensions(),
        }
    }
}

/// 链接场填充方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkFillKind {
    /// 全零
    #[default]
    Zero,
    /// 以种子生成的随机场
    Random,
}

/// 链接场配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LinkConfig {
    /// 填充方式
    #[serde(default)]
    pub fill: LinkFillKind,
    /// 随机种子，每个槽位在此基础上偏移
    #[serde(default)]
    pub seed: u64,
}

impl Default for CoarseOperatorConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            grid: GridConfig::default(),
            make_hermitian: false,
            level: default_level(),
            nbasis: default_nbasis(),
            links: LinkConfig::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Int(0) => Ok(false),
        FlagRepr::Int(1) => Ok(true),
        FlagRepr::Int(n) => Err(D::Error::custom(format!("flag must be 0 or 1, got {}", n))),
    }
}

impl CoarseOperatorConfig {
    /// 从 JSON 字符串解析并验证
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: CoarseOperatorConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 验证配置有效性
    ///
    /// 基向量个数是否受支持由算子层的分发表决定，这里只检查其为正。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nbasis == 0 {
            return Err(ConfigError::invalid("nbasis", self.nbasis, "must be positive"));
        }

        let dims = &self.grid.fdimensions;
        if dims.len() != REQUIRED_DIMENSIONS {
            return Err(ConfigError::invalid(
                "grid.fdimensions",
                format!("{:?}", dims),
                "coarse grid must be four-dimensional",
            ));
        }
        if dims.iter().any(|&n| n == 0) {
            return Err(ConfigError::invalid(
                "grid.fdimensions",
                format!("{:?}", dims),
                "every dimension must be positive",
            ));
        }

        Ok(())
    }

    /// 创建配置描述的共享网格
    pub fn build_grid(&self) -> Result<Arc<GridCartesian>, ConfigError> {
        GridCartesian::shared(self.grid.fdimensions.clone(), self.precision).map_err(|e| {
            ConfigError::invalid(
                "grid.fdimensions",
                format!("{:?}", self.grid.fdimensions),
                &e.to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoarseOperatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.precision, Precision::F64);
        assert_eq!(config.level, 1);
        assert_eq!(config.grid.fdimensions, vec![4, 4, 4, 4]);
    }

    #[test]
    fn test_invalid_nbasis() {
        let config = CoarseOperatorConfig {
            nbasis: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_grid() {
        let mut config = CoarseOperatorConfig::default();
        config.grid.fdimensions = vec![4, 4, 4];
        assert!(config.validate().is_err());

        config.grid.fdimensions = vec![4, 4, 0, 4];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flag_accepts_integers() {
        let config =
            CoarseOperatorConfig::from_json_str(r#"{"make_hermitian": 1, "nbasis": 8}"#).unwrap();
        assert!(config.make_hermitian);
        assert_eq!(config.nbasis, 8);

        let config = CoarseOperatorConfig::from_json_str(r#"{"make_hermitian": false}"#).unwrap();
        assert!(!config.make_hermitian);

        assert!(CoarseOperatorConfig::from_json_str(r#"{"make_hermitian": 2}"#).is_err());
    }

    #[test]
    fn test_precision_alias() {
        let config = CoarseOperatorConfig::from_json_str(
            r#"{"precision": "single", "links": {"fill": "random", "seed": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.precision, Precision::F32);
        assert_eq!(config.links.fill, LinkFillKind::Random);
        assert_eq!(config.links.seed, 3);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = CoarseOperatorConfig {
            make_hermitian: true,
            nbasis: 24,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CoarseOperatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coarse_operator.json");

        let mut config = CoarseOperatorConfig {
            precision: Precision::F32,
            make_hermitian: true,
            level: 0,
            nbasis: 20,
            links: LinkConfig {
                fill: LinkFillKind::Random,
                seed: 99,
            },
            ..Default::default()
        };
        config.grid.fdimensions = vec![2, 2, 4, 8];
        config.save_to_file(&path).unwrap();

        let loaded = CoarseOperatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nonexistent.json");
        assert!(matches!(
            CoarseOperatorConfig::from_file(&missing),
            Err(ConfigError::Io(_))
        ));

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{"nbasis": 8, "grid": {"fdimensions": [4, 4]}}"#).unwrap();
        assert!(matches!(
            CoarseOperatorConfig::from_file(&invalid),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_build_grid_overflow() {
        let mut config = CoarseOperatorConfig::default();
        config.grid.fdimensions = vec![65536; 4];
        assert!(config.validate().is_ok());
        assert!(matches!(config.build_grid(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_build_grid() {
        let config = CoarseOperatorConfig::default();
        let grid = config.build_grid().unwrap();
        assert_eq!(grid.gsites(), 256);
        assert_eq!(grid.precision(), Precision::F64);
    }
}
