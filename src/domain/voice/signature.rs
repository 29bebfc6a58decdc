//! Inbound webhook signature verification.
//!
//! Optional HMAC-SHA256 check of the collect webhook. The platform sends a
//! header of the form `t=<unix seconds>,v1=<hex hmac>` where the HMAC is
//! computed over `"<t>.<raw body>"` with the shared signing secret.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::VoiceFlowError;
use crate::domain::foundation::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age of a signed request.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Maximum allowed clock skew for timestamps in the future.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// HMAC-SHA256 signature bytes.
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses `t=<timestamp>,v1=<signature>`.
    ///
    /// Unknown keys are ignored.
    pub fn parse(header: &str) -> Result<Self, VoiceFlowError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| VoiceFlowError::invalid_signature("invalid header format"))?;

            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse()
                            .map_err(|_| VoiceFlowError::invalid_signature("invalid timestamp"))?,
                    );
                }
                "v1" => {
                    v1_signature = Some(
                        hex::decode(value)
                            .map_err(|_| VoiceFlowError::invalid_signature("invalid v1 signature hex"))?,
                    );
                }
                _ => {}
            }
        }

        Ok(SignatureHeader {
            timestamp: timestamp
                .ok_or_else(|| VoiceFlowError::invalid_signature("missing timestamp"))?,
            v1_signature: v1_signature
                .ok_or_else(|| VoiceFlowError::invalid_signature("missing v1 signature"))?,
        })
    }
}

/// Verifies signed collect webhooks.
pub struct WebhookSignatureVerifier {
    secret: SecretString,
    tolerance_secs: i64,
}

impl WebhookSignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Overrides how old a signed request may be.
    pub fn with_tolerance_secs(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies `signature_header` against the raw request body.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Reject stale or future-dated timestamps
    /// 3. Compute the expected HMAC-SHA256
    /// 4. Compare in constant time
    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: Timestamp,
    ) -> Result<(), VoiceFlowError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp, now)?;

        let expected = self.compute_signature(header.timestamp, payload)?;
        if !constant_time_compare(&expected, &header.v1_signature) {
            return Err(VoiceFlowError::invalid_signature("signature mismatch"));
        }

        Ok(())
    }

    /// Produces a header value for `payload` signed at `timestamp`.
    ///
    /// Used by tooling and tests that play the platform's side.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> Result<String, VoiceFlowError> {
        let signature = self.compute_signature(timestamp, payload)?;
        Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
    }

    fn validate_timestamp(&self, timestamp: i64, now: Timestamp) -> Result<(), VoiceFlowError> {
        let age = now
            .as_unix_secs()
            .checked_sub(timestamp)
            .ok_or_else(|| VoiceFlowError::invalid_signature("invalid timestamp"))?;

        if age > self.tolerance_secs {
            return Err(VoiceFlowError::invalid_signature(format!(
                "request too old ({} seconds)",
                age
            )));
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(VoiceFlowError::invalid_signature("timestamp in the future"));
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, VoiceFlowError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| VoiceFlowError::internal(format!("invalid signing key: {}", e)))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "ivr_signing_secret_12345";
    const BODY: &[u8] = br#"{"digits":"1","messageId":"msg-1"}"#;

    fn verifier() -> WebhookSignatureVerifier {
        WebhookSignatureVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Header parsing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1() {
        let header = SignatureHeader::parse(&format!("t=1700000000,v1={}", "a".repeat(64))).unwrap();

        assert_eq!(header.timestamp, 1_700_000_000);
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let header =
            SignatureHeader::parse(&format!("t=1700000000, v1={},v0=legacy", "b".repeat(64)))
                .unwrap();
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_rejects_malformed_input() {
        for raw in [
            "v1=aaaa",
            "t=1700000000",
            "t=soon,v1=aaaa",
            "t=1700000000,v1=zz",
            "t1700000000",
        ] {
            assert!(
                matches!(SignatureHeader::parse(raw), Err(VoiceFlowError::InvalidSignature(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_own_signature() {
        let v = verifier();
        let header = v.sign(1_700_000_000, BODY).unwrap();

        assert!(v.verify(BODY, &header, at(1_700_000_010)).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let v = verifier();
        let header = v.sign(1_700_000_000, BODY).unwrap();

        let result = v.verify(br#"{"digits":"7"}"#, &header, at(1_700_000_010));

        assert!(matches!(result, Err(VoiceFlowError::InvalidSignature(_))));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let other = WebhookSignatureVerifier::new(SecretString::new("other".to_string()));
        let header = other.sign(1_700_000_000, BODY).unwrap();

        let result = verifier().verify(BODY, &header, at(1_700_000_000));

        assert!(matches!(result, Err(VoiceFlowError::InvalidSignature(_))));
    }

    #[test]
    fn verify_rejects_stale_timestamp() {
        let v = verifier();
        let header = v.sign(1_700_000_000, BODY).unwrap();

        assert!(v.verify(BODY, &header, at(1_700_000_300)).is_ok());
        assert!(v.verify(BODY, &header, at(1_700_000_301)).is_err());
    }

    #[test]
    fn verify_allows_small_clock_skew_only() {
        let v = verifier();
        let header = v.sign(1_700_000_060, BODY).unwrap();

        assert!(v.verify(BODY, &header, at(1_700_000_000)).is_ok());

        let header = v.sign(1_700_000_061, BODY).unwrap();
        assert!(v.verify(BODY, &header, at(1_700_000_000)).is_err());
    }

    #[test]
    fn custom_tolerance_is_respected() {
        let v = verifier().with_tolerance_secs(10);
        let header = v.sign(1_700_000_000, BODY).unwrap();

        assert!(v.verify(BODY, &header, at(1_700_000_011)).is_err());
    }

    #[test]
    fn verify_rejects_extreme_timestamps() {
        let v = verifier();
        let header = format!("t={},v1={}", i64::MIN, "a".repeat(64));

        assert_eq!(SignatureHeader::parse(&header).unwrap().timestamp, i64::MIN);
        let result = v.verify(BODY, &header, at(1_700_000_000));
        assert!(matches!(result, Err(VoiceFlowError::InvalidSignature(_))));

        let header = format!("t={},v1={}", i64::MAX, "a".repeat(64));
        let result = v.verify(BODY, &header, at(1_700_000_000));
        assert!(matches!(result, Err(VoiceFlowError::InvalidSignature(_))));
    }
}
