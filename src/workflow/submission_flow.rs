//! 提交流程 - 流程层
//!
//! 核心职责：驱动一次提交的完整生命周期
//!
//! 状态顺序：
//! 1. Idle → Submitting（评分有效、没有进行中的提交）
//! 2. Submitting → Succeeded → 延迟后关闭宿主或重置表单
//! 3. Submitting → Failed（非 2xx 或请求异常），用户可立即重新提交
//!
//! 不重试、不退避、不计数

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::clients::Transport;
use crate::config::Config;
use crate::error::{SubmissionError, ValidationError, SUBMIT_FAILED_MESSAGE};
use crate::models::{FeedbackPayload, FileRef, FormSnapshot, SubmissionPhase};
use crate::services::validate_rating;
use crate::workflow::form_state::FormState;

/// 宿主提供的关闭回调
pub type CloseCallback = Box<dyn Fn() + Send + Sync>;

/// 提交成功后的动作，构造时确定
pub enum PostSuccessAction {
    /// 以弹窗形式嵌入：通知宿主关闭
    CloseHost(CloseCallback),
    /// 独立页面：重置表单以便再次填写
    ResetInline,
}

impl PostSuccessAction {
    /// 有关闭回调就关闭宿主，否则原地重置
    pub fn from_close(on_close: Option<CloseCallback>) -> Self {
        match on_close {
            Some(callback) => PostSuccessAction::CloseHost(callback),
            None => PostSuccessAction::ResetInline,
        }
    }
}

/// 提交被忽略的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 评分未设置或无效
    RatingUnset,
    /// 已有提交在进行中
    InFlight,
    /// 已提交成功，正在展示成功提示
    AlreadySucceeded,
}

/// 成功后实际执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSuccess {
    HostClosed,
    FormReset,
}

/// 一次提交调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Skipped(SkipReason),
    Completed(PostSuccess),
}

/// 提交控制器
///
/// - 独占持有一个 FormState
/// - 每次状态变化都会通过 watch 通道发布快照
/// - 锁只在同步代码里持有，不跨越 `.await`
pub struct SubmissionController<T: Transport> {
    transport: T,
    state: Mutex<FormState>,
    post_success: PostSuccessAction,
    success_delay: Duration,
    snapshots: watch::Sender<FormSnapshot>,
}

impl<T: Transport> SubmissionController<T> {
    /// 创建新的提交控制器
    pub fn new(transport: T, config: &Config, on_close: Option<CloseCallback>) -> Self {
        let state = FormState::new();
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            transport,
            state: Mutex::new(state),
            post_success: PostSuccessAction::from_close(on_close),
            success_delay: config.success_delay(),
            snapshots,
        }
    }

    /// 订阅表单快照（渲染层使用）
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.lock().snapshot()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lock().phase().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.update(|state| state.set_name(name));
    }

    pub fn set_comment(&self, comment: impl Into<String>) {
        self.update(|state| state.set_comment(comment));
    }

    pub fn set_rating(&self, rating: i32) -> bool {
        self.update(|state| state.set_rating(rating))
    }

    pub fn attach_file(&self, file: Option<FileRef>) -> Result<(), ValidationError> {
        let result = self.update(|state| state.attach_file(file));
        if let Err(e) = &result {
            debug!("附件被拒绝: {}", e);
        }
        result
    }

    pub fn remove_file(&self) {
        self.update(FormState::remove_file);
    }

    pub fn reset(&self) {
        self.update(FormState::reset);
    }

    /// 提交表单
    ///
    /// 返回 `Err` 时阶段已经是 `Failed`，可以直接再次调用
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmissionError> {
        let payload = match self.begin_submission() {
            Ok(payload) => payload,
            Err(reason) => {
                debug!("忽略提交: {:?}", reason);
                return Ok(SubmitOutcome::Skipped(reason));
            }
        };

        // future 中途被丢弃时由它收尾
        let mut guard = AttemptGuard::new(self);

        info!("📤 开始提交反馈 (评分: {})", payload.rating);

        let result = match self.transport.send(payload).await {
            Ok(status) if status.is_success() => Ok(()),
            Ok(status) => Err(SubmissionError::ServerRejected {
                status: status.as_u16(),
            }),
            Err(e) => Err(SubmissionError::transport(format!("{:#}", e))),
        };

        if let Err(e) = result {
            error!("❌ 反馈提交失败: {}", e);
            let reason = e.user_message().to_string();
            self.update(|state| state.set_phase(SubmissionPhase::Failed { reason }));
            return Err(e);
        }

        info!("✓ 反馈提交成功");
        self.update(|state| state.set_phase(SubmissionPhase::Succeeded));

        sleep(self.success_delay).await;

        guard.disarm();
        Ok(SubmitOutcome::Completed(self.run_post_success()))
    }

    /// 检查守卫并切换到 Submitting，检查与切换在同一把锁内完成
    fn begin_submission(&self) -> Result<FeedbackPayload, SkipReason> {
        let mut state = self.lock();

        match state.phase() {
            SubmissionPhase::Submitting => return Err(SkipReason::InFlight),
            SubmissionPhase::Succeeded => return Err(SkipReason::AlreadySucceeded),
            SubmissionPhase::Idle | SubmissionPhase::Failed { .. } => {}
        }

        if !validate_rating(state.rating() as i32) {
            return Err(SkipReason::RatingUnset);
        }

        state.set_phase(SubmissionPhase::Submitting);
        let payload = state.to_payload();
        self.snapshots.send_replace(state.snapshot());

        Ok(payload)
    }

    fn run_post_success(&self) -> PostSuccess {
        match &self.post_success {
            PostSuccessAction::CloseHost(close) => {
                info!("关闭反馈窗口");
                close();
                PostSuccess::HostClosed
            }
            PostSuccessAction::ResetInline => {
                info!("重置反馈表单");
                self.update(FormState::reset);
                PostSuccess::FormReset
            }
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        let mut state = self.lock();
        let result = f(&mut state);
        self.snapshots.send_replace(state.snapshot());
        result
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        // 单一写者，锁中毒时状态依然完整
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 一次提交尝试的收尾
///
/// `submit()` 的 future 在结束前被丢弃（timeout、select!、abort）时：
/// - 仍在 Submitting：转为 Failed，允许再次提交
/// - 已经 Succeeded：立即执行成功后的动作，保证恰好执行一次
struct AttemptGuard<'a, T: Transport> {
    controller: &'a SubmissionController<T>,
    armed: bool,
}

impl<'a, T: Transport> AttemptGuard<'a, T> {
    fn new(controller: &'a SubmissionController<T>) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<T: Transport> Drop for AttemptGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        match self.controller.phase() {
            SubmissionPhase::Submitting => {
                warn!("⚠️ 提交在完成前被取消，表单回到可重新提交状态");
                self.controller.update(|state| {
                    state.set_phase(SubmissionPhase::Failed {
                        reason: SUBMIT_FAILED_MESSAGE.to_string(),
                    })
                });
            }
            SubmissionPhase::Succeeded => {
                warn!("⚠️ 成功提示被提前中断");
                self.controller.run_post_success();
            }
            SubmissionPhase::Idle | SubmissionPhase::Failed { .. } => {}
        }
    }
}
