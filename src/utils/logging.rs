/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::error::SubmissionError;
use crate::models::FormSnapshot;
use crate::workflow::SubmitOutcome;
use tracing::{debug, error, info, warn};

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 反馈组件启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📮 提交地址: {}", config.endpoint_url);
    info!("⏱️ 成功提示时长: {}ms", config.success_delay_ms);
    info!("{}", "=".repeat(60));
}

/// 以渲染层的视角记录一次表单快照
pub fn log_snapshot(snapshot: &FormSnapshot) {
    debug!(
        "表单快照: 评分={} ({}) | 姓名={} | 评论={} | 附件={:?} | 可提交={}",
        snapshot.rating,
        snapshot.rating_label.unwrap_or("-"),
        truncate_text(&snapshot.name, 20),
        truncate_text(&snapshot.comment, 40),
        snapshot.attachment.as_ref().map(|a| a.name.as_str()),
        snapshot.can_submit
    );

    if let Some(file_error) = &snapshot.file_error {
        warn!("⚠️ 附件错误: {}", file_error);
    }

    match serde_json::to_string(snapshot) {
        Ok(json) => debug!("快照 JSON: {}", json),
        Err(e) => debug!("快照序列化失败: {}", e),
    }
}

/// 记录当前主题
pub fn log_theme(dark: bool) {
    info!("🎨 主题: {}", if dark { "dark" } else { "light" });
}

/// 记录提交结果
pub fn log_outcome(outcome: &Result<SubmitOutcome, SubmissionError>) {
    info!("\n{}", "─".repeat(60));
    match outcome {
        Ok(SubmitOutcome::Completed(done)) => info!("✅ 反馈已发送 ({:?})", done),
        Ok(SubmitOutcome::Skipped(reason)) => warn!("⏭️ 未提交: {:?}", reason),
        Err(e) => error!("❌ {} ({})", e.user_message(), e),
    }
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
