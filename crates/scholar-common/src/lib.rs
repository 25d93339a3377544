pub mod errors;
pub mod id;
pub mod text;

pub use errors::{ConfigError, ScholarError, StorageError};
pub use id::{generate_id, new_id, new_message_id, SessionId};
pub use text::{is_valid_email, sanitize_input, MAX_INPUT_LEN};

pub type Result<T> = std::result::Result<T, ScholarError>;
