use anyhow::Result;
use clap::Parser;
use quiz_generate::cli::Cli;
use quiz_generate::utils::logging;
use quiz_generate::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(&cli.config)?;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    App::initialize(config).run(cli.command).await
}
