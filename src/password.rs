use std::num::NonZeroU32;

use base64::{engine::general_purpose, Engine};
use ring::{
    digest, pbkdf2,
    rand::{SecureRandom, SystemRandom},
};

use crate::error::AppError;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;
const SALT_LEN: usize = 16;
// Zeroed salt and hash in the stored format, used when there is no user to check against.
const DUMMY_HASH: &str =
    "AAAAAAAAAAAAAAAAAAAAAA==$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
const ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => panic!("iteration count must be non-zero"),
};

/// Hashes a password with a fresh random salt.
///
/// The result is `base64(salt)$base64(hash)` and is what gets stored in `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::Internal("failed to generate password salt".to_string()))?;

    let mut hash = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(ALGORITHM, ITERATIONS, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{}${}",
        general_purpose::STANDARD.encode(salt),
        general_purpose::STANDARD.encode(hash)
    ))
}

/// Checks a plaintext password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, hash)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (
        general_purpose::STANDARD.decode(salt),
        general_purpose::STANDARD.decode(hash),
    ) else {
        return false;
    };

    pbkdf2::verify(ALGORITHM, ITERATIONS, &salt, password.as_bytes(), &hash).is_ok()
}

/// Same as `verify_password`, but a missing user still pays for a full derivation so the
/// two failure paths take the same time.
pub fn verify_stored_password(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            std::hint::black_box(verify_password(password, DUMMY_HASH));
            false
        }
    }
}
