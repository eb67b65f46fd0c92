// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// System key context: the long-lived keys every issuing or verifying
// process is configured with.

use std::fmt;

use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{PUBLIC_KEY_LEN, SEED_LEN, SIGNATURE_LEN};
use ring::signature::Ed25519KeyPair;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::fingerprint::fingerprint;
use crate::signing::{sign_with_seed, verify_signature};

/// ChaCha20-Poly1305 key length.
pub const ENCRYPTION_KEY_LEN: usize = 32;
/// Ed25519 secret key length in `seed || public key` form.
pub const SIGNING_SECRET_KEY_LEN: usize = SEED_LEN + PUBLIC_KEY_LEN;

/// The system signing key, kept as its seed so nothing but the seed buffer
/// outlives a signing call.
struct SystemSigningKey {
    seed: Zeroizing<[u8; SEED_LEN]>,
    public_key: [u8; PUBLIC_KEY_LEN],
}

/// Process-wide system keys.
///
/// Built once and read-only afterwards, so a single context can be shared by
/// reference across threads running issuance and verification concurrently.
/// Key memory is wiped when the context is dropped.
pub struct KeyContext {
    encryption_key: Zeroizing<[u8; ENCRYPTION_KEY_LEN]>,
    signing_key: Option<SystemSigningKey>,
    /// Keys whose signatures `verify` accepts; the first is the primary one.
    trusted_keys: Vec<[u8; PUBLIC_KEY_LEN]>,
}

fn check_len(key: &'static str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(IdPassError::InvalidKeyLength {
            key,
            expected,
            actual: bytes.len(),
        })
    }
}

fn public_key_from(key: &'static str, bytes: &[u8]) -> Result<[u8; PUBLIC_KEY_LEN]> {
    check_len(key, bytes, PUBLIC_KEY_LEN)?;
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(bytes);
    Ok(out)
}

impl KeyContext {
    /// Build a context able to issue and verify cards.
    ///
    /// `signing_secret_key` is the 64-byte `seed || public key` form. The
    /// verification key need not be its public half: a context may sign
    /// with one system key while trusting another.
    #[instrument(skip_all)]
    pub fn new(
        encryption_key: &[u8],
        signing_secret_key: &[u8],
        verification_key: &[u8],
    ) -> Result<Self> {
        check_len("signing secret key", signing_secret_key, SIGNING_SECRET_KEY_LEN)?;
        let mut ctx = Self::verification_only(encryption_key, verification_key)?;

        let (seed_bytes, public_bytes) = signing_secret_key.split_at(SEED_LEN);
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        seed.copy_from_slice(seed_bytes);
        let public_key = public_key_from("signing public key", public_bytes)?;

        // Reject a secret key whose embedded public half is not its own.
        Ed25519KeyPair::from_seed_and_public_key(&seed[..], &public_key)
            .map_err(|e| IdPassError::InvalidKey(format!("signing secret key: {e}")))?;

        ctx.signing_key = Some(SystemSigningKey { seed, public_key });
        debug!(signer = %fingerprint(&public_key), "key context ready");
        Ok(ctx)
    }

    /// Build a context that can verify and open cards but never issue them.
    pub fn verification_only(encryption_key: &[u8], verification_key: &[u8]) -> Result<Self> {
        check_len("encryption key", encryption_key, ENCRYPTION_KEY_LEN)?;
        let mut key = Zeroizing::new([0u8; ENCRYPTION_KEY_LEN]);
        key.copy_from_slice(encryption_key);

        Ok(Self {
            encryption_key: key,
            signing_key: None,
            trusted_keys: vec![public_key_from("verification key", verification_key)?],
        })
    }

    /// Additionally trust signatures made by `verification_key`, e.g. a
    /// retired system key whose cards are still in circulation.
    pub fn with_trusted_key(mut self, verification_key: &[u8]) -> Result<Self> {
        let key = public_key_from("verification key", verification_key)?;
        if !self.trusted_keys.contains(&key) {
            self.trusted_keys.push(key);
        }
        Ok(self)
    }

    /// The symmetric key cards are sealed under.
    pub fn encryption_key(&self) -> &[u8; ENCRYPTION_KEY_LEN] {
        &self.encryption_key
    }

    /// Whether this context holds a system signing key.
    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }

    /// The primary verification key.
    pub fn verification_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.trusted_keys[0]
    }

    /// All keys whose signatures are accepted, primary first.
    pub fn trusted_keys(&self) -> &[[u8; PUBLIC_KEY_LEN]] {
        &self.trusted_keys
    }

    /// Sign `message` with the system signing key.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(IdPassError::SigningKeyUnavailable)?;
        sign_with_seed(&key.seed, &key.public_key, message)
    }

    /// Check `signature` over `message` against every trusted key. Never
    /// touches the encryption key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        if self
            .trusted_keys
            .iter()
            .any(|key| verify_signature(key, message, signature).is_ok())
        {
            Ok(())
        } else {
            Err(IdPassError::InvalidSignature)
        }
    }
}

impl fmt::Debug for KeyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyContext")
            .field(
                "signer",
                &self.signing_key.as_ref().map(|k| fingerprint(&k.public_key)),
            )
            .field(
                "trusted_keys",
                &self
                    .trusted_keys
                    .iter()
                    .map(|k| fingerprint(k))
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
