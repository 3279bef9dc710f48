//! Salted password hashing.
//!
//! Hashes are stored as `pbkdf2-sha256$<rounds>$<salt hex>$<hash hex>` so the
//! round count can be raised later without invalidating existing members.

use rand::RngCore;
use sha2::Sha256;

use crate::{EngineError, ResultEngine};

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Default PBKDF2 round count for new hashes.
pub const DEFAULT_ROUNDS: u32 = 100_000;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, rounds: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive(password, &salt, rounds);
    format!(
        "{SCHEME}${rounds}${}${}",
        hex::encode(salt),
        hex::encode(key)
    )
}

/// Check `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, rounds, salt, expected] = parts.as_slice() else {
        return false;
    };
    if *scheme != SCHEME {
        return false;
    }
    let (Ok(rounds), Ok(salt), Ok(expected)) =
        (rounds.parse::<u32>(), hex::decode(salt), hex::decode(expected))
    else {
        return false;
    };
    if rounds == 0 || expected.len() != KEY_LEN {
        return false;
    }

    let key = derive(password, &salt, rounds);
    key.iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Check a login attempt. Without a stored hash the password is checked
/// against `decoy` and the attempt fails, so unknown usernames cost as much
/// as wrong passwords.
pub(crate) fn verify_login(password: &str, stored: Option<&str>, decoy: &str) -> bool {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            let _ = std::hint::black_box(verify_password(password, decoy));
            false
        }
    }
}

/// [`hash_password`] on the blocking pool.
pub(crate) async fn hash_blocking(password: &str, rounds: u32) -> ResultEngine<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password, rounds))
        .await
        .map_err(|err| EngineError::PasswordHash(err.to_string()))
}

/// [`verify_login`] on the blocking pool.
pub(crate) async fn verify_login_blocking(
    password: &str,
    stored: Option<String>,
    decoy: &str,
) -> ResultEngine<bool> {
    let password = password.to_string();
    let decoy = decoy.to_string();
    tokio::task::spawn_blocking(move || verify_login(&password, stored.as_deref(), &decoy))
        .await
        .map_err(|err| EngineError::PasswordHash(err.to_string()))
}

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut key);
    key
}
