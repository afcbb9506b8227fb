//! Bearer credential helpers
//!
//! The token is an opaque string on this side of the wire: it is attached to
//! requests, never verified. Claims decoding exists for diagnostics only.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Derives the Authorization header value for a token
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Decodes the claims segment of a JWT without verifying the signature.
///
/// Returns `None` for anything that is not a well-formed three-segment token
/// with a base64url JSON payload. Never panics; malformed and hostile tokens
/// are expected inputs.
pub fn decode_claims_unverified(token: &str) -> Option<serde_json::Value> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    segments.next()?;

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
