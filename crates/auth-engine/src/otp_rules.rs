//! Input rules for the one-time-code entry field.

/// Digits in a verification code.
pub const OTP_CODE_LENGTH: usize = 6;

/// Keep ASCII digits only, truncated to [`OTP_CODE_LENGTH`].
pub fn sanitize_otp_input(raw_input: &str) -> String {
    raw_input
        .chars()
        .filter(char::is_ascii_digit)
        .take(OTP_CODE_LENGTH)
        .collect()
}

/// Accessibility label for the code slot at `index` (zero-based, clamped).
pub fn otp_slot_description(index: usize) -> String {
    let position = index.saturating_add(1).clamp(1, OTP_CODE_LENGTH);
    format!("digit {} of {}", position, OTP_CODE_LENGTH)
}

/// True for exactly [`OTP_CODE_LENGTH`] ASCII digits.
pub fn is_complete_code(code: &str) -> bool {
    code.len() == OTP_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Minimal shape check: an `@` and a `.` somewhere.
pub fn is_plausible_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}
