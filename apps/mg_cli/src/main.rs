// apps/mg_cli/src/main.rs

//! 粗化算子命令行界面
//!
//! 从配置构建粗化多重网格算子并输出摘要。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**：
//! - 零泛型语法：仅使用 `CoarseOperatorConfig` 和 `Box<dyn DynCoarseOperator>`
//! - 基向量个数、精度、层级全部作为运行时值传入

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// 粗化多重网格算子构建工具
#[derive(Parser)]
#[command(name = "mg_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build coarsened multigrid operators from runtime parameters", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 构建算子
    Build(commands::build::BuildArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
