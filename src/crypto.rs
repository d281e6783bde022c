use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies values with HMAC-SHA256 under `$SESSION_SECRET`.
#[derive(Clone)]
pub struct Signer {
    secret: Vec<u8>,
}

impl Signer {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length, so this cannot fail.
        HmacSha256::new_from_slice(&self.secret)
            .expect("hmac can be initialized with a key of any size")
    }

    pub fn digest(&self, val: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(val);

        mac.finalize().into_bytes().to_vec()
    }

    pub fn is_valid(&self, val: &[u8], digest: &[u8]) -> bool {
        let mut mac = self.mac();
        mac.update(val);

        mac.verify_slice(digest).is_ok()
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_verifies_under_same_secret() {
        let signer = Signer::new("foo");
        let digest = signer.digest(b"hello");
        assert!(signer.is_valid(b"hello", &digest));
        assert!(!signer.is_valid(b"hellO", &digest));
    }

    #[test]
    fn test_digest_rejected_under_other_secret() {
        let digest = Signer::new("foo").digest(b"hello");
        assert!(!Signer::new("bar").is_valid(b"hello", &digest));
    }
}
