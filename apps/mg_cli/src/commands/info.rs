// apps/mg_cli/src/commands/info.rs

//! 信息显示命令

use anyhow::Result;
use clap::Args;
use mg_coarse::{NUM_LINKS, SUPPORTED_BASIS_SIZES};
use mg_config::{CoarseOperatorConfig, Precision};

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 只输出默认配置（JSON）
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let defaults = serde_json::to_string_pretty(&CoarseOperatorConfig::default())?;
    if args.defaults {
        println!("{}", defaults);
        return Ok(());
    }

    println!("=== mg_cli {} ===", env!("CARGO_PKG_VERSION"));
    println!("\n可用精度:");
    for p in Precision::ALL {
        println!("  - {} ({}), {} bytes/complex", p.name(), p.lattice_name(), p.complex_bytes());
    }
    println!("\n受支持的基向量个数: {:?}", SUPPORTED_BASIS_SIZES);
    println!("链接数: {}", NUM_LINKS);
    println!("\n默认配置:\n{}", defaults);
    Ok(())
}
