//! 应用入口
//!
//! 组装配置、传输、提交控制器和主题，按草稿填写一次表单并提交

use crate::clients::FeedbackClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::FileRef;
use crate::services::ThemeProvider;
use crate::utils::logging::{log_outcome, log_snapshot, log_startup, log_theme};
use crate::workflow::{SubmissionController, SubmitOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 待填写的反馈内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub name: String,
    pub rating: Option<i32>,
    pub comment: String,
    pub picture: Option<PathBuf>,
}

impl FeedbackDraft {
    /// 从 `FEEDBACK_NAME` / `FEEDBACK_RATING` / `FEEDBACK_COMMENT` / `FEEDBACK_PICTURE` 读取
    pub fn from_env() -> AppResult<Self> {
        let rating = match std::env::var("FEEDBACK_RATING") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| AppError::env_parse_failed("FEEDBACK_RATING", &value, "i32"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            name: std::env::var("FEEDBACK_NAME").unwrap_or_default(),
            rating,
            comment: std::env::var("FEEDBACK_COMMENT").unwrap_or_default(),
            picture: std::env::var("FEEDBACK_PICTURE").ok().map(PathBuf::from),
        })
    }
}

/// 应用主结构
pub struct App {
    controller: Arc<SubmissionController<FeedbackClient>>,
    theme: ThemeProvider,
}

impl App {
    /// 初始化应用
    ///
    /// 命令行下没有宿主窗口，成功后原地重置表单
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let client = FeedbackClient::new(&config);
        let controller = Arc::new(SubmissionController::new(client, &config, None));
        let theme = ThemeProvider::new(config.prefers_dark);

        Self { controller, theme }
    }

    pub fn controller(&self) -> &SubmissionController<FeedbackClient> {
        &self.controller
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// 手动切换主题
    pub fn toggle_theme(&self) -> bool {
        self.theme.toggle()
    }

    /// 跟随宿主配色偏好，直到宿主通道关闭
    pub fn follow_system_theme(&self, system: watch::Receiver<bool>) -> JoinHandle<()> {
        self.theme.follow_system(system)
    }

    /// 填写草稿并提交一次
    pub async fn run(&self, draft: FeedbackDraft) -> AppResult<SubmitOutcome> {
        let renderer = self.spawn_renderer();
        let result = self.fill_and_submit(draft).await;
        renderer.abort();
        result
    }

    async fn fill_and_submit(&self, draft: FeedbackDraft) -> AppResult<SubmitOutcome> {
        self.fill(draft).await?;

        let outcome = self.controller.submit().await;
        log_outcome(&outcome);

        Ok(outcome?)
    }

    async fn fill(&self, draft: FeedbackDraft) -> AppResult<()> {
        self.controller.set_name(draft.name);
        self.controller.set_comment(draft.comment);

        if let Some(rating) = draft.rating {
            if !self.controller.set_rating(rating) {
                warn!("⚠️ 评分 {} 不在 1~5 之间，已忽略", rating);
            }
        }

        if let Some(path) = draft.picture {
            let file = FileRef::from_path(&path).await?;
            info!("📎 选择附件: {} ({} 字节)", file.name(), file.size_bytes());
            // 附件错误只影响附件本身，不阻止提交
            let _ = self.controller.attach_file(Some(file));
        }

        Ok(())
    }

    /// 订阅快照和主题并写日志，相当于一个最简单的渲染层
    pub fn spawn_renderer(&self) -> JoinHandle<()> {
        let mut snapshots = self.controller.subscribe();
        let mut theme = self.theme.subscribe();

        tokio::spawn(async move {
            log_theme(*theme.borrow_and_update());
            loop {
                tokio::select! {
                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = snapshots.borrow_and_update().clone();
                        log_snapshot(&snapshot);
                    }
                    changed = theme.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        log_theme(*theme.borrow_and_update());
                    }
                }
            }
        })
    }
}
