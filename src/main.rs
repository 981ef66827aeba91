use anyhow::Result;
use quiz_bank::utils::logging;
use quiz_bank::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
