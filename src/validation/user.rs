use super::{FieldErrors, FieldReader, Mode, RawInput, TextRule};

pub const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL: TextRule = TextRule::between(3, 254, "Invalid email format", "Email is too long");
const PASSWORD: TextRule = TextRule::between(
    MIN_PASSWORD_LENGTH,
    128,
    "Password must be at least 8 characters",
    "Password must be less than 128 characters",
);
const PRESENT: TextRule = TextRule::min(1, "Required");

/// Email and password as submitted to sign-up or sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validate credentials for a new account
pub fn validate_registration(input: &RawInput) -> Result<Credentials, FieldErrors> {
    let mut reader = FieldReader::new(input, Mode::Full);
    let email = reader.text("email", &EMAIL).map(|e| normalize_email(&e));
    let password = reader.text("password", &PASSWORD);
    let mut errors = reader.into_errors();

    if let Some(email) = &email {
        if let Err(message) = check_email_format(email) {
            errors.add("email", message);
        }
    }

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials { email, password }),
        _ => Err(errors),
    }
}

/// Sign-in only needs both fields present; wrong values are reported as bad credentials
pub fn validate_sign_in(input: &RawInput) -> Result<Credentials, FieldErrors> {
    let mut reader = FieldReader::new(input, Mode::Full);
    let email = reader.text("email", &PRESENT).map(|e| normalize_email(&e));
    let password = reader.text("password", &PRESENT);
    let errors = reader.into_errors();

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials { email, password }),
        _ => Err(errors),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic `local@domain.tld` shape check
pub fn check_email_format(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err("Invalid email format");
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err("Invalid email format"),
    }
}
