// apps/mg_cli/src/commands/mod.rs

//! 子命令

pub mod build;
pub mod info;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use mg_config::CoarseOperatorConfig;

/// 读取配置文件，未给出路径时使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<CoarseOperatorConfig> {
    match path {
        Some(p) => CoarseOperatorConfig::from_file(p)
            .with_context(|| format!("无法加载配置文件 {}", p.display())),
        None => Ok(CoarseOperatorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_config::{LinkFillKind, Precision};

    #[test]
    fn test_load_shipped_example() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("coarse_operator.example.json");
        let config = load_config(Some(&path)).unwrap();
        assert!(config.make_hermitian);
        assert_eq!(config.precision, Precision::F64);
        assert_eq!(config.level, 0);
        assert_eq!(config.nbasis, 12);
        assert_eq!(config.grid.fdimensions, vec![2, 2, 2, 4]);
        assert_eq!(config.links.fill, LinkFillKind::Random);
        assert!(mg_coarse::is_supported(config.nbasis));
    }

    #[test]
    fn test_load_default_without_path() {
        assert_eq!(load_config(None).unwrap(), CoarseOperatorConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Some(Path::new("does/not/exist.json"))).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
