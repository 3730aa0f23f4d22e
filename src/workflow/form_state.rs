//! 表单状态 - 流程层
//!
//! 保存用户输入的所有字段以及提交阶段，只包含数据和状态迁移规则

use crate::error::ValidationError;
use crate::models::{rating_label, FeedbackPayload, FileRef, FormSnapshot, SubmissionPhase};
use crate::services::{validate_file, validate_rating};

/// 一次会话内的表单状态
///
/// - `rating == 0` 表示未评分
/// - 被拒绝的附件永远不会被保存
/// - `Failed` 只在下一次用户操作时回到 `Idle`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    name: String,
    rating: u8,
    comment: String,
    attached_file: Option<FileRef>,
    file_error: Option<ValidationError>,
    phase: SubmissionPhase,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn attached_file(&self) -> Option<&FileRef> {
        self.attached_file.as_ref()
    }

    pub fn file_error(&self) -> Option<&ValidationError> {
        self.file_error.as_ref()
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// 原样保存，不做 trim
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.leave_failed();
        self.name = name.into();
    }

    /// 原样保存，不做 trim
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.leave_failed();
        self.comment = comment.into();
    }

    /// 只接受 1 ~ 5，其余值忽略；返回是否被接受
    pub fn set_rating(&mut self, rating: i32) -> bool {
        if !validate_rating(rating) {
            return false;
        }
        self.leave_failed();
        self.rating = rating as u8;
        true
    }

    /// 选择附件（`None` 表示清空选择）
    ///
    /// 每次尝试都会先清掉上一次的错误；校验失败时附件保持为空
    pub fn attach_file(&mut self, file: Option<FileRef>) -> Result<(), ValidationError> {
        self.leave_failed();
        self.file_error = None;
        self.attached_file = None;

        let Some(file) = file else {
            return Ok(());
        };

        match validate_file(&file) {
            Ok(()) => {
                self.attached_file = Some(file);
                Ok(())
            }
            Err(e) => {
                self.file_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// 等价于 `attach_file(None)`
    pub fn remove_file(&mut self) {
        // attach_file(None) 不会失败
        let _ = self.attach_file(None);
    }

    /// 回到初始状态
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 当前是否允许提交（按钮可用）
    pub fn can_submit(&self) -> bool {
        validate_rating(self.rating as i32)
            && matches!(
                self.phase,
                SubmissionPhase::Idle | SubmissionPhase::Failed { .. }
            )
    }

    /// 构建提交负载，trim 只在这里发生一次
    pub fn to_payload(&self) -> FeedbackPayload {
        FeedbackPayload {
            name: self.name.trim().to_string(),
            rating: self.rating.to_string(),
            comment: self.comment.trim().to_string(),
            profile_picture: self.attached_file.clone(),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            name: self.name.clone(),
            rating: self.rating,
            rating_label: rating_label(self.rating),
            comment: self.comment.clone(),
            attachment: self.attached_file.as_ref().map(Into::into),
            file_error: self.file_error.as_ref().map(ToString::to_string),
            phase: self.phase.clone(),
            can_submit: self.can_submit(),
        }
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
    }

    fn leave_failed(&mut self) {
        if matches!(self.phase, SubmissionPhase::Failed { .. }) {
            self.phase = SubmissionPhase::Idle;
        }
    }
}
