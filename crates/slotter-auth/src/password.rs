//! Password verification using Argon2id.

use std::borrow::Cow;

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Prepend the optional pepper to the plaintext before hashing or
/// verification. The same pepper must be configured on every instance
/// that writes or checks hashes.
fn apply_pepper<'a>(password: &'a str, pepper: Option<&str>) -> Cow<'a, str> {
    match pepper {
        Some(p) => Cow::Owned(format!("{p}{password}")),
        None => Cow::Borrowed(password),
    }
}

/// Check a plaintext password against an Argon2id PHC-format hash.
///
/// A mismatch is `Err(AuthError::InvalidCredentials)`; a hash that
/// cannot be parsed is `Err(AuthError::Crypto)`.
pub fn check_password(password: &str, hash: &str, pepper: Option<&str>) -> Result<(), AuthError> {
    let input = apply_pepper(password, pepper);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(input.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(AuthError::InvalidCredentials),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;

    fn hash(password: &str, pepper: Option<&str>) -> String {
        let input = apply_pepper(password, pepper);
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(input.as_bytes(), &salt)
            .expect("hashing failed")
            .to_string()
    }

    #[test]
    fn correct_password_passes() {
        let stored = hash("hunter2", None);
        assert!(check_password("hunter2", &stored, None).is_ok());
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let stored = hash("hunter2", None);
        let err = check_password("wrong", &stored, None).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn pepper_must_match_on_both_sides() {
        let stored = hash("hunter2", Some("pepper!"));
        assert!(check_password("hunter2", &stored, Some("pepper!")).is_ok());
        assert!(matches!(
            check_password("hunter2", &stored, None).unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn malformed_hash_is_a_crypto_error() {
        let err = check_password("pw", "not-a-hash", None).unwrap_err();
        assert!(matches!(err, AuthError::Crypto(_)));
    }
}
