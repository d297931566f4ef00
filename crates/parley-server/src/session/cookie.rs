//! Signed session cookie.
//!
//! The cookie value is `<session-id>.<signature>` where the signature is an
//! HMAC-SHA256 of the id under a key generated at process start. A restart
//! therefore invalidates every outstanding cookie.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use base64::Engine;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use parley_common::SessionId;
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "parley_session";

/// The session a request belongs to.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub id: SessionId,
    /// True when the request carried no valid cookie and a fresh id was
    /// minted; the response must set the cookie.
    pub is_new: bool,
}

/// Signs and verifies session cookies.
pub struct CookieSigner {
    key: [u8; 32],
}

impl CookieSigner {
    /// Signer with a fresh random key.
    pub fn random() -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    #[cfg(test)]
    pub fn from_key(key: [u8; 32]) -> Self {
        Self { key }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC pads or hashes keys of any length, so this cannot fail.
        <HmacSha256 as KeyInit>::new_from_slice(&self.key)
            .expect("HMAC accepts keys of any length")
    }

    /// Cookie value for `id`.
    pub fn sign(&self, id: &SessionId) -> String {
        let mut mac = self.mac();
        mac.update(id.as_str().as_bytes());
        let tag = mac.finalize().into_bytes();
        format!("{}.{}", id, B64.encode(tag))
    }

    /// Recover the session id from a cookie value, rejecting forged or
    /// malformed values.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (raw_id, tag) = value.rsplit_once('.')?;
        let tag = B64.decode(tag).ok()?;

        let mut mac = self.mac();
        mac.update(raw_id.as_bytes());
        mac.verify_slice(&tag).ok()?;

        SessionId::parse(raw_id).filter(|id| id.as_str() == raw_id)
    }

    /// Find a valid session cookie among the request's `Cookie` headers.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == SESSION_COOKIE)
            .find_map(|(_, value)| self.verify(value))
    }

    /// Session for this request, minting a new one when the cookie is
    /// missing or invalid.
    pub fn resolve(&self, headers: &HeaderMap) -> ResolvedSession {
        match self.session_from_headers(headers) {
            Some(id) => ResolvedSession { id, is_new: false },
            None => ResolvedSession {
                id: SessionId::new(),
                is_new: true,
            },
        }
    }

    /// `Set-Cookie` header value for `id`.
    pub fn set_cookie_value(&self, id: &SessionId) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.sign(id)
        )
    }

    /// Attach the cookie to `response` if the session was just created.
    pub fn attach(&self, response: &mut Response, session: &ResolvedSession) {
        if !session.is_new {
            return;
        }
        match HeaderValue::from_str(&self.set_cookie_value(&session.id)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Could not encode session cookie"),
        }
    }
}
