//! Input format rules, checked before any storage lookup.

pub const USERNAME_MIN_LENGTH: usize = 2;
pub const USERNAME_MAX_LENGTH: usize = 20;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const MESSAGE_MIN_LENGTH: usize = 10;
pub const MESSAGE_MAX_LENGTH: usize = 300;

/// Validates a candidate username: 2-20 characters, alphanumeric or underscore.
///
/// # Errors
/// Returns a human-readable description of the first rule violated.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < USERNAME_MIN_LENGTH {
        return Err(format!("Username must be at least {USERNAME_MIN_LENGTH} characters"));
    }
    if username.len() > USERNAME_MAX_LENGTH {
        return Err(format!("Username must be at most {USERNAME_MAX_LENGTH} characters"));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, numbers, and underscores".to_string());
    }
    Ok(())
}

/// Shallow shape check only; deliverability is proven by the verification code.
///
/// # Errors
/// Returns a description of the violation.
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email address".to_string());
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(char::is_whitespace) {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

/// # Errors
/// Returns a description of the violation.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < PASSWORD_MIN_LENGTH {
        return Err(format!("Password must be at least {PASSWORD_MIN_LENGTH} characters"));
    }
    Ok(())
}

/// Validates anonymous message content length (in characters, not bytes).
///
/// # Errors
/// Returns a description of the violation.
pub fn validate_message_content(content: &str) -> Result<(), String> {
    let chars = content.chars().count();
    if chars < MESSAGE_MIN_LENGTH {
        return Err(format!("Message must be at least {MESSAGE_MIN_LENGTH} characters"));
    }
    if chars > MESSAGE_MAX_LENGTH {
        return Err(format!("Message must be at most {MESSAGE_MAX_LENGTH} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_usernames() {
        for name in ["ab", "alice", "user_123", "A2345678901234567890"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_bad_usernames() {
        assert!(validate_username("a").is_err());
        assert!(validate_username("this_name_is_way_too_long").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("héllo").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn email_shape_check() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing.local").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user @b.co").is_err());
    }

    #[test]
    fn message_length_bounds() {
        assert!(validate_message_content("short").is_err());
        assert!(validate_message_content("long enough message").is_ok());
        assert!(validate_message_content(&"x".repeat(300)).is_ok());
        assert!(validate_message_content(&"x".repeat(301)).is_err());
    }

    #[test]
    fn message_length_counts_chars_not_bytes() {
        // 10 multibyte characters are 30 bytes but still pass the minimum.
        assert!(validate_message_content(&"é".repeat(10)).is_ok());
    }
}
