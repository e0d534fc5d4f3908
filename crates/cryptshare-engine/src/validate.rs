//! Input validation: pure, synchronous checks consulted before either
//! orchestrator issues a network call.

use cryptshare_core::{ValidationError, MAX_FILE_SIZE, MIN_PASSWORD_LEN};

/// Advisory password classification shown to the user.
///
/// Only `PasswordTooShort` gates submission; a `Weak` 8-character password
/// is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        }
    }
}

/// Classify a password by length: < 8 weak, < 12 medium, otherwise strong.
pub fn password_strength(password: &str) -> PasswordStrength {
    match password.chars().count() {
        n if n < 8 => PasswordStrength::Weak,
        n if n < 12 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

/// Gate for the encrypt workflow. `file` is `(name, byte_size)` of the
/// selected file, or `None` when nothing is selected.
pub fn validate_encrypt(file: Option<(&str, u64)>, password: &str) -> Result<(), ValidationError> {
    let (_, size) = file.ok_or(ValidationError::NoFileSelected)?;
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge {
            size,
            limit: MAX_FILE_SIZE,
        });
    }
    validate_password(password)
}

/// Gate for the decrypt workflow.
pub fn validate_decrypt(file_id: &str, password: &str) -> Result<(), ValidationError> {
    if file_id.trim().is_empty() {
        return Err(ValidationError::NoFileId);
    }
    validate_password(password)
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::NoPasswordProvided);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
