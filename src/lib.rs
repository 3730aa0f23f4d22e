//! # Feedback Widget
//!
//! 反馈表单组件的核心：评分、姓名、评论和可选头像的本地校验与 multipart 提交
//!
//! ## 架构设计
//!
//! ### ① 传输层（Clients）
//! - `clients/` - 只负责把负载发出去
//! - `Transport` - 提交流程依赖的抽象
//! - `FeedbackClient` - 基于 reqwest multipart 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯能力，不关心流程
//! - `validator` - 附件类型 / 大小、评分范围校验
//! - `ThemeProvider` - 深色 / 浅色标志
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 一次反馈的完整生命周期
//! - `FormState` - 字段与提交阶段
//! - `SubmissionController` - Idle → Submitting → Succeeded / Failed
//!
//! ### ④ 入口（App）
//! - `app` - 组装配置、控制器和主题，提交一次草稿
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{FeedbackClient, Transport};
pub use config::Config;
pub use error::{AppError, AppResult, SubmissionError, ValidationError};
pub use models::{FeedbackPayload, FileRef, FormSnapshot, SubmissionPhase};
pub use services::ThemeProvider;
pub use workflow::{FormState, PostSuccessAction, SubmissionController, SubmitOutcome};
