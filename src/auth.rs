//! Local bearer-token minting.
//!
//! The ledger harness accepts any HS256-signed token whose claims name a test
//! subject with the ledger API scope; nothing verifies the signing key, so a
//! fresh random key per run is sufficient.

use jsonwebtoken::{encode, EncodingKey, Header};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_SUBJECT: &str = "testUser";
pub const LEDGER_SCOPE: &str = "daml_ledger_api";

const TOKEN_TTL_SECS: u64 = 3_600;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub scope: String,
    pub iat: u64,
    pub exp: u64,
}

/// Mint a bearer token for this run, signed with a throwaway random key.
pub fn mint_token() -> anyhow::Result<String> {
    let mut key = [0u8; 256];
    rand::thread_rng().fill_bytes(&mut key);

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        sub: TEST_SUBJECT.to_string(),
        scope: LEDGER_SCOPE.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(&key))?)
}
