//! Request signature for the token endpoint.
//!
//! The application secret is itself a bcrypt salt string
//! (`$2a$<cost>$<22 salt chars>`). The signature is the bcrypt hash of
//! `{client_id}_{timestamp}` under that salt, base64-encoded.

use base64::{
    Engine as _, alphabet,
    engine::{GeneralPurpose, general_purpose},
};
use bcrypt::Version;
use tracing::trace;

use crate::error::CommerceError;

/// Salt-format markers the secret may start with.
const SALT_MARKERS: [(&str, Version); 3] = [
    ("$2a$", Version::TwoA),
    ("$2b$", Version::TwoB),
    ("$2y$", Version::TwoY),
];

/// `$2a$` + two cost digits + `$` + 22 salt characters.
const SALT_STRING_LEN: usize = 29;

/// bcrypt's own base64 dialect.
const BCRYPT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    general_purpose::NO_PAD.with_decode_allow_trailing_bits(true),
);

/// Builds the password that gets hashed.
pub fn signature_password(client_id: &str, timestamp: &str) -> String {
    format!("{client_id}_{timestamp}")
}

/// Signs token requests with the application secret.
#[derive(Clone)]
pub struct SignatureGenerator {
    version: Version,
    cost: u32,
    salt: [u8; 16],
}

impl SignatureGenerator {
    /// Parses the secret as a bcrypt salt string.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Configuration`] if the secret does not carry
    /// the salt-format marker, or its cost or salt cannot be read.
    pub fn from_secret(secret: &str) -> Result<Self, CommerceError> {
        let secret = secret.trim();
        let version = SALT_MARKERS
            .iter()
            .find(|(marker, _)| secret.starts_with(marker))
            .map(|(_, version)| version.clone())
            .ok_or_else(|| {
                let markers: Vec<String> = SALT_MARKERS
                    .iter()
                    .map(|(marker, _)| format!("\"{marker}\""))
                    .collect();
                CommerceError::Configuration(format!(
                    "application secret is not a bcrypt salt (expected one of {} as prefix)",
                    markers.join(", ")
                ))
            })?;

        if secret.len() < SALT_STRING_LEN || secret.as_bytes()[6] != b'$' {
            return Err(CommerceError::Configuration(
                "application secret is too short to hold a bcrypt salt".to_string(),
            ));
        }

        let cost: u32 = secret
            .get(4..6)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| {
                CommerceError::Configuration(
                    "application secret has an unreadable cost".to_string(),
                )
            })?;
        if !(4..=31).contains(&cost) {
            return Err(CommerceError::Configuration(format!(
                "application secret cost {cost} is outside 4..=31"
            )));
        }

        let salt: [u8; 16] = secret
            .get(7..SALT_STRING_LEN)
            .and_then(|encoded| BCRYPT_BASE64.decode(encoded).ok())
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| {
                CommerceError::Configuration(
                    "application secret has an unreadable salt".to_string(),
                )
            })?;

        Ok(Self {
            version,
            cost,
            salt,
        })
    }

    /// Returns the bcrypt cost read from the secret.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Signs `{client_id}_{timestamp}`.
    ///
    /// Deterministic: the same inputs always give the same signature.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Configuration`] if hashing fails.
    pub fn sign(&self, client_id: &str, timestamp: &str) -> Result<String, CommerceError> {
        let password = signature_password(client_id, timestamp);
        let hashed = bcrypt::hash_with_salt(password.as_bytes(), self.cost, self.salt)
            .map_err(|e| CommerceError::Configuration(format!("signature hashing failed: {e}")))?
            .format_for_version(self.version.clone());
        trace!(client_id, timestamp, "Signed token request");
        Ok(general_purpose::STANDARD.encode(hashed))
    }
}

impl std::fmt::Debug for SignatureGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureGenerator")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Last salt char 'u' has zero trailing bits, so the salt re-encodes verbatim.
    const SECRET: &str = "$2a$04$abcdefghijklmnopqrstuu";

    fn decoded(signature: &str) -> String {
        String::from_utf8(general_purpose::STANDARD.decode(signature).unwrap()).unwrap()
    }

    #[test]
    fn test_password_format() {
        assert_eq!(signature_password("app", "1700000000000"), "app_1700000000000");
    }

    #[test]
    fn test_signature_is_deterministic() {
        let signer = SignatureGenerator::from_secret(SECRET).unwrap();
        let a = signer.sign("app", "1700000000000").unwrap();
        let b = signer.sign("app", "1700000000000").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_embeds_salt_string() {
        let signer = SignatureGenerator::from_secret(SECRET).unwrap();
        let hash = decoded(&signer.sign("app", "1700000000000").unwrap());
        assert!(hash.starts_with(SECRET));
        assert_eq!(hash.len(), 60);
    }

    #[test]
    fn test_signature_depends_on_inputs() {
        let signer = SignatureGenerator::from_secret(SECRET).unwrap();
        let ms = signer.sign("app", "1700000000000").unwrap();
        let sec = signer.sign("app", "1700000000").unwrap();
        let other = signer.sign("other", "1700000000000").unwrap();
        assert_ne!(ms, sec);
        assert_ne!(ms, other);
    }

    #[test]
    fn test_secret_without_marker_is_rejected() {
        for secret in ["plain-secret", "", "2a$04$abcdefghijklmnopqrstuu"] {
            let err = SignatureGenerator::from_secret(secret).unwrap_err();
            assert!(matches!(err, CommerceError::Configuration(_)), "{secret}");
        }
    }

    #[test]
    fn test_marker_error_names_every_accepted_marker() {
        let message = SignatureGenerator::from_secret("plain-secret")
            .unwrap_err()
            .to_string();
        for marker in ["$2a$", "$2b$", "$2y$"] {
            assert!(message.contains(marker), "{message}");
        }
    }

    #[test]
    fn test_truncated_secret_is_rejected() {
        let err = SignatureGenerator::from_secret("$2a$04$short").unwrap_err();
        assert!(matches!(err, CommerceError::Configuration(_)));
    }

    #[test]
    fn test_bad_cost_is_rejected() {
        let err = SignatureGenerator::from_secret("$2a$xx$abcdefghijklmnopqrstuu").unwrap_err();
        assert!(matches!(err, CommerceError::Configuration(_)));
        let err = SignatureGenerator::from_secret("$2a$03$abcdefghijklmnopqrstuu").unwrap_err();
        assert!(matches!(err, CommerceError::Configuration(_)));
    }

    #[test]
    fn test_2b_marker_is_kept() {
        let secret = "$2b$04$abcdefghijklmnopqrstuu";
        let signer = SignatureGenerator::from_secret(secret).unwrap();
        assert!(decoded(&signer.sign("app", "1").unwrap()).starts_with("$2b$04$"));
    }
}
