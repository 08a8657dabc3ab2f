//! Request signing for the SwitchBot API v1.1
//!
//! `sign = base64(HMAC-SHA256(secret, token + t + nonce))`, where `t` is the
//! epoch time in milliseconds and `nonce` a fresh UUIDv4 per request.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// One set of authentication headers. Never reused across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub token: String,
    pub t: i64,
    pub nonce: String,
    pub sign: String,
}

impl SignedHeaders {
    pub fn to_header_map(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&self.token)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("charset"),
            HeaderValue::from_static("utf8"),
        );
        headers.insert(HeaderName::from_static("t"), header_value(&self.t.to_string())?);
        headers.insert(HeaderName::from_static("sign"), header_value(&self.sign)?);
        headers.insert(HeaderName::from_static("nonce"), header_value(&self.nonce)?);
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| AppError::Signing(format!("Invalid header value: {}", e)))
}

#[derive(Clone)]
pub struct Signer {
    token: String,
    secret_key: String,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

impl Signer {
    pub fn new(token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Headers for a new request: current time, fresh nonce
    pub fn sign_now(&self) -> Result<SignedHeaders, AppError> {
        let t = chrono::Utc::now().timestamp_millis();
        let nonce = uuid::Uuid::new_v4().to_string();
        self.sign_at(t, &nonce)
    }

    pub fn sign_at(&self, t: i64, nonce: &str) -> Result<SignedHeaders, AppError> {
        let string_to_sign = format!("{}{}{}", self.token, t, nonce);

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| AppError::Signing(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        let digest = mac.finalize().into_bytes();

        Ok(SignedHeaders {
            token: self.token.clone(),
            t,
            nonce: nonce.to_string(),
            sign: STANDARD.encode(digest),
        })
    }
}
