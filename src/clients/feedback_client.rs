/// 反馈 API 客户端
///
/// 以 multipart/form-data 把一次反馈 POST 到配置的地址
use crate::clients::transport::Transport;
use crate::config::Config;
use crate::models::{FeedbackPayload, PROFILE_PICTURE_FIELD};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// 反馈 API 客户端
pub struct FeedbackClient {
    client: Client,
    endpoint_url: String,
}

impl FeedbackClient {
    /// 创建新的反馈客户端
    ///
    /// 不设置超时，沿用 reqwest 的默认行为
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            endpoint_url: config.endpoint_url.clone(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// 构建 multipart 表单
    ///
    /// 空字符串照常发送；附件保留原文件名和 MIME 类型
    pub fn build_form(payload: FeedbackPayload) -> Result<Form> {
        let mut form = Form::new()
            .text("name", payload.name)
            .text("rating", payload.rating)
            .text("comment", payload.comment);

        if let Some(file) = payload.profile_picture {
            let file_name = file.name().to_string();
            let mime_type = file.mime_type().to_string();
            let part = Part::bytes(file.into_bytes())
                .file_name(file_name)
                .mime_str(&mime_type)
                .with_context(|| format!("无效的 MIME 类型: {}", mime_type))?;
            form = form.part(PROFILE_PICTURE_FIELD, part);
        }

        Ok(form)
    }
}

#[async_trait]
impl Transport for FeedbackClient {
    async fn send(&self, payload: FeedbackPayload) -> Result<StatusCode> {
        debug!(
            "提交反馈: rating={} name_len={} comment_len={} 附件={:?}",
            payload.rating,
            payload.name.len(),
            payload.comment.len(),
            payload.profile_picture.as_ref().map(|f| f.name())
        );

        let form = Self::build_form(payload)?;

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("请求失败: {}", self.endpoint_url))?;

        let status = response.status();
        debug!("提交结果: HTTP {}", status);

        Ok(status)
    }
}
