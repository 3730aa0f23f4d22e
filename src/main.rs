use anyhow::Result;
use feedback_widget::app::{App, FeedbackDraft};
use feedback_widget::config::Config;
use feedback_widget::logger;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（FEEDBACK_CONFIG 指向可选的 TOML 文件）
    let config_path = std::env::var("FEEDBACK_CONFIG").ok().map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    let draft = FeedbackDraft::from_env()?;

    // 初始化并运行应用
    App::initialize(config).run(draft).await?;

    Ok(())
}
