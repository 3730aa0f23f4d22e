//! 传输抽象
//!
//! 提交流程只依赖这个 trait，真实实现见 `FeedbackClient`

use crate::models::FeedbackPayload;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;

/// 把反馈负载发送出去，返回 HTTP 状态码
///
/// `Err` 表示请求没有拿到响应（网络、连接、序列化等）
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: FeedbackPayload) -> Result<StatusCode>;
}
