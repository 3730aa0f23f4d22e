//! 反馈数据模型
//!
//! 包括提交阶段、发往服务端的 multipart 负载以及给渲染层看的快照

use crate::models::file_ref::FileRef;
use serde::Serialize;

/// multipart 中附件字段的固定名称
pub const PROFILE_PICTURE_FIELD: &str = "profilePicture";

/// 评分文字，下标 0 对应 1 星
pub const RATING_LABELS: [&str; 5] = ["Terrible", "Poor", "Average", "Good", "Amazing"];

/// 评分对应的文字，0 或越界返回 None
pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        1..=5 => Some(RATING_LABELS[(rating - 1) as usize]),
        _ => None,
    }
}

/// 提交阶段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// `reason` 是展示给用户的统一提示
    Failed { reason: String },
}

/// 发往服务端的反馈内容
///
/// 文本字段在构建时已经 trim，空字符串照常发送
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPayload {
    pub name: String,
    /// 十进制整数字符串 "1" ~ "5"
    pub rating: String,
    pub comment: String,
    pub profile_picture: Option<FileRef>,
}

/// 附件元数据（不含字节）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentInfo {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl From<&FileRef> for AttachmentInfo {
    fn from(file: &FileRef) -> Self {
        Self {
            name: file.name().to_string(),
            size_bytes: file.size_bytes(),
            mime_type: file.mime_type().to_string(),
        }
    }
}

/// 表单快照，渲染层只读
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub name: String,
    pub rating: u8,
    pub rating_label: Option<&'static str>,
    pub comment: String,
    pub attachment: Option<AttachmentInfo>,
    pub file_error: Option<String>,
    pub phase: SubmissionPhase,
    /// 提交按钮是否可用
    pub can_submit: bool,
}
