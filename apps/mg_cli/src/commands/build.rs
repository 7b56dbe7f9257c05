// apps/mg_cli/src/commands/build.rs

//! 构建命令
//!
//! 读取配置，按命令行覆盖参数，生成链接场并构建算子，最后以 JSON 输出摘要。

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::Args;
use mg_coarse::{CoarseOperatorBuilder, LinkFill};
use mg_config::{LinkFillKind, Precision};
use tracing::info;

use super::load_config;

/// 构建参数
#[derive(Args)]
pub struct BuildArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 基向量个数
    #[arg(short, long)]
    pub nbasis: Option<usize>,

    /// 层级（0 为最细层）
    #[arg(long)]
    pub level: Option<usize>,

    /// 精度 (f32 / f64)
    #[arg(short, long)]
    pub precision: Option<Precision>,

    /// 厄米性标志，接受 true/false 或 1/0
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub hermitian: Option<bool>,

    /// 网格维度，例如 4.4.4.8
    #[arg(short, long, value_delimiter = '.')]
    pub grid: Option<Vec<usize>>,

    /// 随机填充链接场所用的种子
    #[arg(long)]
    pub seed: Option<u64>,

    /// 摘要输出文件，缺省时写到标准输出
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行构建命令
pub fn execute(args: BuildArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(nbasis) = args.nbasis {
        config.nbasis = nbasis;
    }
    if let Some(level) = args.level {
        config.level = level;
    }
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(hermitian) = args.hermitian {
        config.make_hermitian = hermitian;
    }
    if let Some(dims) = args.grid {
        config.grid.fdimensions = dims;
    }
    if let Some(seed) = args.seed {
        config.links.fill = LinkFillKind::Random;
        config.links.seed = seed;
    }

    info!(
        nbasis = config.nbasis,
        precision = %config.precision,
        level = config.level,
        hermitian = config.make_hermitian,
        "building coarse operator"
    );

    let start = Instant::now();
    let op = CoarseOperatorBuilder::from_config(&config)
        .context("配置无效")?
        .with_generated_links(LinkFill::from(config.links))
        .context("无法生成链接场")?
        .build()
        .context("构建算子失败")?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "operator ready");

    let summary = serde_json::to_string_pretty(&op.summary())?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, summary)
                .with_context(|| format!("无法写入 {}", path.display()))?;
            info!("summary written to {}", path.display());
        }
        None => println!("{}", summary),
    }

    Ok(())
}
