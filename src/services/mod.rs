pub mod theme;
pub mod validator;

pub use theme::ThemeProvider;
pub use validator::{validate_file, validate_rating, ALLOWED_MIME_TYPES, MAX_FILE_SIZE_BYTES};
