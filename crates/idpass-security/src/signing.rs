// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ed25519 signing and key generation.
//
// Two keypairs are in play: the system keypair that signs every sealed card,
// and a per-card keypair generated at issuance and sealed inside the card so
// the bearer can sign on their own behalf. Both use the same primitives here.
//
// Secret keys use the 64-byte `seed || public key` layout. `ring` rebuilds its
// key pair from the seed for each signing call; the seed itself stays in a
// zeroizing buffer owned by the caller.

use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{CardKeys, PUBLIC_KEY_LEN, SEED_LEN, SIGNATURE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use ring::signature::{ED25519, Ed25519KeyPair, KeyPair, UnparsedPublicKey};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::keys::{ENCRYPTION_KEY_LEN, SIGNING_SECRET_KEY_LEN};

/// A freshly generated system signing keypair.
pub struct SystemKeypair {
    /// `seed || public key`, the form [`crate::KeyContext::new`] accepts.
    pub secret_key: Zeroizing<[u8; SIGNING_SECRET_KEY_LEN]>,
    pub public_key: [u8; PUBLIC_KEY_LEN],
}

/// Fill a zeroizing buffer from the OS CSPRNG.
pub(crate) fn random_secret<const N: usize>() -> Result<Zeroizing<[u8; N]>> {
    let mut buf = Zeroizing::new([0u8; N]);
    SystemRandom::new()
        .fill(&mut buf[..])
        .map_err(|e| IdPassError::Encryption(format!("random generation failed: {e}")))?;
    Ok(buf)
}

fn public_key_of(seed: &[u8; SEED_LEN]) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
        .map_err(|e| IdPassError::InvalidKey(format!("seed rejected: {e}")))?;
    let mut public_key = [0u8; PUBLIC_KEY_LEN];
    public_key.copy_from_slice(key_pair.public_key().as_ref());
    Ok(public_key)
}

/// Generate a random symmetric key for card encryption.
pub fn generate_encryption_key() -> Result<Zeroizing<[u8; ENCRYPTION_KEY_LEN]>> {
    random_secret()
}

/// Generate a system signing keypair.
#[instrument]
pub fn generate_signature_keypair() -> Result<SystemKeypair> {
    let seed = random_secret::<SEED_LEN>()?;
    let public_key = public_key_of(&seed)?;

    let mut secret_key = Zeroizing::new([0u8; SIGNING_SECRET_KEY_LEN]);
    secret_key[..SEED_LEN].copy_from_slice(&seed[..]);
    secret_key[SEED_LEN..].copy_from_slice(&public_key);

    debug!("system signing keypair generated");
    Ok(SystemKeypair {
        secret_key,
        public_key,
    })
}

/// Generate the per-card signing keypair sealed into a new card.
#[instrument]
pub fn generate_card_keys() -> Result<CardKeys> {
    let seed = random_secret::<SEED_LEN>()?;
    let public_key = public_key_of(&seed)?;
    debug!("card keypair generated");
    Ok(CardKeys::Ed25519 {
        seed: *seed,
        public_key,
    })
}

/// Sign `message` with the keypair described by `seed` and `public_key`.
///
/// Fails with `InvalidKey` if the public key does not belong to the seed.
pub fn sign_with_seed(
    seed: &[u8; SEED_LEN],
    public_key: &[u8; PUBLIC_KEY_LEN],
    message: &[u8],
) -> Result<[u8; SIGNATURE_LEN]> {
    let key_pair = Ed25519KeyPair::from_seed_and_public_key(seed, public_key)
        .map_err(|e| IdPassError::InvalidKey(format!("keypair rejected: {e}")))?;

    let mut signature = [0u8; SIGNATURE_LEN];
    signature.copy_from_slice(key_pair.sign(message).as_ref());
    Ok(signature)
}

/// Verify an Ed25519 `signature` over `message`.
pub fn verify_signature(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    UnparsedPublicKey::new(&ED25519, public_key)
        .verify(message, signature)
        .map_err(|_| IdPassError::InvalidSignature)
}
