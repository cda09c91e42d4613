use rand::Rng;
use rand::rngs::OsRng;
use time::OffsetDateTime;

/// Verification codes are fixed-length numeric strings.
pub const CODE_LENGTH: usize = 6;

/// Generates a fresh one-time verification code.
#[must_use]
pub fn generate_code() -> String {
    OsRng.gen_range(100_000..1_000_000u32).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    CodeExpired,
    CodeMismatch,
}

/// Decides the outcome of a code submission.
///
/// Expiry wins over mismatch: a stale code always reports as expired, so the
/// caller is told to re-register rather than retype.
#[must_use]
pub fn check_code(
    stored: &str,
    submitted: &str,
    expires_at: OffsetDateTime,
    now: OffsetDateTime,
) -> VerificationOutcome {
    if now >= expires_at {
        VerificationOutcome::CodeExpired
    } else if stored != submitted {
        VerificationOutcome::CodeMismatch
    } else {
        VerificationOutcome::Verified
    }
}
