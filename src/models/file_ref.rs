//! 附件资源
//!
//! 一个独占持有的二进制文件，加上校验只会读取的元数据

use crate::error::{AppError, AppResult, FileError};
use std::fmt;
use std::path::Path;
use tokio::fs;

/// 用户选择的附件
///
/// 字节内容对外不可变，校验只读取 `name` / `size_bytes` / `mime_type`
#[derive(Clone, PartialEq, Eq)]
pub struct FileRef {
    name: String,
    size_bytes: u64,
    mime_type: String,
    bytes: Vec<u8>,
}

impl FileRef {
    /// 由内存中的字节创建附件，大小取字节长度
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// 从磁盘读取附件，MIME 类型按扩展名推断
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                AppError::File(FileError::InvalidPath {
                    path: path.display().to_string(),
                })
            })?;

        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        Ok(Self::new(name, mime_type_for_path(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// 取出字节内容（用于构建 multipart part）
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRef")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

/// 按扩展名推断 MIME 类型，未知扩展名返回 `application/octet-stream`
pub fn mime_type_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
