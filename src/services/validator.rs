//! 校验服务 - 业务能力层
//!
//! 纯函数，只看元数据，不读取文件内容

use crate::error::ValidationError;
use crate::models::FileRef;

/// 允许上传的 MIME 类型
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// 附件大小上限：5 MiB
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// 校验附件
///
/// 先检查类型，再检查大小
pub fn validate_file(file: &FileRef) -> Result<(), ValidationError> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type()) {
        return Err(ValidationError::UnsupportedType {
            mime_type: file.mime_type().to_string(),
        });
    }

    if file.size_bytes() > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge {
            size_bytes: file.size_bytes(),
        });
    }

    Ok(())
}

/// 评分是否在 [1, 5] 之内
pub fn validate_rating(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, size: usize) -> FileRef {
        FileRef::new("upload", mime, vec![0u8; size])
    }

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(validate_file(&file(mime, 10)), Ok(()));
        }
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", "IMAGE/PNG", ""] {
            assert!(matches!(
                validate_file(&file(mime, 10)),
                Err(ValidationError::UnsupportedType { .. })
            ));
        }
    }

    #[test]
    fn test_size_boundary() {
        assert_eq!(
            validate_file(&file("image/png", MAX_FILE_SIZE_BYTES as usize)),
            Ok(())
        );
        assert_eq!(
            validate_file(&file("image/png", MAX_FILE_SIZE_BYTES as usize + 1)),
            Err(ValidationError::TooLarge {
                size_bytes: MAX_FILE_SIZE_BYTES + 1
            })
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let result = validate_file(&file("image/gif", MAX_FILE_SIZE_BYTES as usize + 1));
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_validate_rating() {
        assert!(!validate_rating(-1));
        assert!(!validate_rating(0));
        for r in 1..=5 {
            assert!(validate_rating(r));
        }
        assert!(!validate_rating(6));
        assert!(!validate_rating(i32::MAX));
    }
}
