//! cryptshare-core: shared types, config schema, and error taxonomy

pub mod config;
pub mod error;
pub mod types;

pub use error::{CryptshareError, CryptshareResult, ValidationError};

/// Hard ceiling on the size of a file submitted for encryption (50 MiB).
///
/// The encrypt path sends the whole file in a single multipart request, so
/// this bound caps both client memory and request payload size.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;
