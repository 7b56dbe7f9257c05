// apps/mg_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查配置文件能否解析，以及其中的基向量个数是否受支持。不分配链接场。

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use mg_coarse::SUPPORTED_BASIS_SIZES;
use tracing::{error, info};

use super::load_config;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("validating {}", args.config.display());

    let config = match load_config(Some(&args.config)) {
        Ok(c) => c,
        Err(e) => {
            error!("{:#}", e);
            println!("✗ {:#}", e);
            bail!("验证失败");
        }
    };

    if !mg_coarse::is_supported(config.nbasis) {
        println!("✗ 不支持的基向量个数 {}", config.nbasis);
        println!("  可用: {:?}", SUPPORTED_BASIS_SIZES);
        bail!("验证失败");
    }

    println!("✓ 配置有效");
    println!(
        "  nbasis = {}, precision = {}, level = {}, grid = {:?}",
        config.nbasis, config.precision, config.level, config.grid.fdimensions
    );
    Ok(())
}
