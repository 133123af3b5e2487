// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bls12_381_plus::{G1Projective, G2Projective, Scalar};
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::{ciphersuites::Bbs04Ciphersuite, context::PairingContext, open::Credential};
use crate::{
    ecgroup::{
        pairing::pairing_product_is_identity,
        point::{g1_from_bytes, g1_to_bytes, g2_from_bytes, g2_to_bytes, G1_BYTES, G2_BYTES},
        scalar::{scalar_inverse, scalar_random, ScalarExt, SCALAR_BYTES},
    },
    errors::Error,
    utils::util::{decode_hex, expect_len},
};

/// Resampling budget for the member exponent when gamma + x == 0
pub const MAX_KEYGEN_ATTEMPTS: usize = 8;

/// Group public key `(g1, h, u, v, g2, w)` with `u = h^(1/xi1)`,
/// `v = h^(1/xi2)` and `w = g2^gamma`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GroupPublicKey {
    pub(crate) g1: G1Projective,
    pub(crate) h: G1Projective,
    pub(crate) u: G1Projective,
    pub(crate) v: G1Projective,
    pub(crate) g2: G2Projective,
    pub(crate) w: G2Projective,
}

impl GroupPublicKey {
    pub const BYTES: usize = 4 * G1_BYTES + 2 * G2_BYTES;

    /// `g1 || h || u || v || g2 || w`
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[0..48].copy_from_slice(&g1_to_bytes(&self.g1));
        bytes[48..96].copy_from_slice(&g1_to_bytes(&self.h));
        bytes[96..144].copy_from_slice(&g1_to_bytes(&self.u));
        bytes[144..192].copy_from_slice(&g1_to_bytes(&self.v));
        bytes[192..288].copy_from_slice(&g2_to_bytes(&self.g2));
        bytes[288..384].copy_from_slice(&g2_to_bytes(&self.w));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        expect_len(bytes, Self::BYTES, "group public key")?;

        Ok(Self {
            g1: g1_from_bytes(&bytes[0..48])?,
            h: g1_from_bytes(&bytes[48..96])?,
            u: g1_from_bytes(&bytes[96..144])?,
            v: g1_from_bytes(&bytes[144..192])?,
            g2: g2_from_bytes(&bytes[192..288])?,
            w: g2_from_bytes(&bytes[288..384])?,
        })
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(s: &str) -> Result<Self, Error> {
        Self::from_bytes(&decode_hex(s)?)
    }

    pub fn g1(&self) -> &G1Projective {
        &self.g1
    }

    pub fn h(&self) -> &G1Projective {
        &self.h
    }

    pub fn u(&self) -> &G1Projective {
        &self.u
    }

    pub fn v(&self) -> &G1Projective {
        &self.v
    }

    pub fn g2(&self) -> &G2Projective {
        &self.g2
    }

    /// Issuer's public commitment `g2^gamma`
    pub fn w(&self) -> &G2Projective {
        &self.w
    }
}

/// Opener's tracing secret `(xi1, xi2)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OpenerSecretKey {
    pub(crate) xi1: Scalar,
    pub(crate) xi2: Scalar,
}

impl OpenerSecretKey {
    pub const BYTES: usize = 2 * SCALAR_BYTES;

    //in BE order
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[0..32].copy_from_slice(&self.xi1.to_bytes_be());
        bytes[32..64].copy_from_slice(&self.xi2.to_bytes_be());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        expect_len(bytes, Self::BYTES, "opener secret key")?;

        Ok(Self {
            xi1: Scalar::from_bytes_be(&bytes[0..32])?,
            xi2: Scalar::from_bytes_be(&bytes[32..64])?,
        })
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(s: &str) -> Result<Self, Error> {
        Self::from_bytes(&decode_hex(s)?)
    }
}

/// Issuer's secret `gamma`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct IssuerSecretKey(pub(crate) Scalar);

impl IssuerSecretKey {
    pub const BYTES: usize = SCALAR_BYTES;

    //in BE order
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.0.to_bytes_be()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        expect_len(bytes, Self::BYTES, "issuer secret key")?;
        Ok(Self(Scalar::from_bytes_be(bytes)?))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(s: &str) -> Result<Self, Error> {
        Self::from_bytes(&decode_hex(s)?)
    }
}

/// Member secret `(A, x)` with `e(A, w * g2^x) == e(g1, g2)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UserSecretKey {
    pub(crate) a: G1Projective,
    pub(crate) x: Scalar,
}

impl UserSecretKey {
    pub const BYTES: usize = G1_BYTES + SCALAR_BYTES;

    /// `A || x`
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[0..48].copy_from_slice(&g1_to_bytes(&self.a));
        bytes[48..80].copy_from_slice(&self.x.to_bytes_be());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        expect_len(bytes, Self::BYTES, "user secret key")?;

        Ok(Self {
            a: g1_from_bytes(&bytes[0..48])?,
            x: Scalar::from_bytes_be(&bytes[48..80])?,
        })
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(s: &str) -> Result<Self, Error> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// The membership credential `A`, as recovered by the opener.
    pub fn credential(&self) -> Credential {
        Credential(self.a)
    }
}

/// Output of [`setup`]. Each part belongs to a different role.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GroupKeys {
    pub(crate) gpk: GroupPublicKey,
    pub(crate) osk: OpenerSecretKey,
    pub(crate) isk: IssuerSecretKey,
}

impl GroupKeys {
    pub fn group_public_key(&self) -> &GroupPublicKey {
        &self.gpk
    }

    pub fn opener_secret_key(&self) -> &OpenerSecretKey {
        &self.osk
    }

    pub fn issuer_secret_key(&self) -> &IssuerSecretKey {
        &self.isk
    }

    /// Returns `(gpk, osk, isk)`.
    pub fn into_parts(self) -> (GroupPublicKey, OpenerSecretKey, IssuerSecretKey) {
        (self.gpk, self.osk, self.isk)
    }
}

/// Generates a fresh group.
///
/// # Description
/// Samples `g1, h` in G1 and `g2` in G2, the opener secrets `xi1, xi2` and the
/// issuer secret `gamma`, then derives `u = h^(1/xi1)`, `v = h^(1/xi2)` and
/// `w = g2^gamma`.
///
/// # Inputs:
/// * `ctx` (REQUIRED), the pairing context.
/// * `rng` (REQUIRED), a cryptographically secure RNG.
///
/// # Output:
/// * [`GroupKeys`] or [`Error::RandomnessFailure`].
pub fn setup<CS, R>(ctx: &PairingContext<CS>, rng: &mut R) -> Result<GroupKeys, Error>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
    R: RngCore + CryptoRng,
{
    let g1 = ctx.random_g1(rng)?;
    let g2 = ctx.random_g2(rng)?;
    let h = ctx.random_g1(rng)?;

    let xi1 = scalar_random(rng)?;
    let xi2 = scalar_random(rng)?;

    let u = h * scalar_inverse(&xi1)?;
    let v = h * scalar_inverse(&xi2)?;

    let gamma = scalar_random(rng)?;
    let w = g2 * gamma;

    log::debug!("group setup completed");

    Ok(GroupKeys {
        gpk: GroupPublicKey { g1, h, u, v, g2, w },
        osk: OpenerSecretKey { xi1, xi2 },
        isk: IssuerSecretKey(gamma),
    })
}

/// Issues a member key `(A, x)` with `A = g1^(1/(gamma + x))`.
///
/// `x` is resampled when `gamma + x == 0`; after [`MAX_KEYGEN_ATTEMPTS`] draws
/// the call fails with [`Error::ArithmeticError`].
pub fn user_keygen<R>(
    gpk: &GroupPublicKey,
    isk: &IssuerSecretKey,
    rng: &mut R,
) -> Result<UserSecretKey, Error>
where
    R: RngCore + CryptoRng,
{
    for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
        let x = scalar_random(rng)?;
        let gamma_plus_x = isk.0 + x;

        if bool::from(gamma_plus_x.is_zero()) {
            log::warn!("gamma + x == 0 at attempt {}, resampling x", attempt);
            continue;
        }

        let a = gpk.g1 * scalar_inverse(&gamma_plus_x)?;
        log::debug!("member key issued");
        return Ok(UserSecretKey { a, x });
    }

    Err(Error::ArithmeticError(format!(
        "gamma + x == 0 in {} consecutive attempts",
        MAX_KEYGEN_ATTEMPTS
    )))
}

/// Checks `e(A, w * g2^x) == e(g1, g2)` as a single multi-pairing.
pub fn verify_usk(gpk: &GroupPublicKey, usk: &UserSecretKey) -> bool {
    let w_g2x = gpk.w + gpk.g2 * usk.x;

    pairing_product_is_identity(&[(usk.a, w_g2x), (-gpk.g1, gpk.g2)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs04::ciphersuites::Bls12381Sha256;
    use rand::thread_rng;

    struct CountingRng {
        // scalars handed out by try_fill_bytes, as 48 byte OKM blocks
        blocks: Vec<[u8; 48]>,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.try_fill_bytes(dest).unwrap()
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            let block = self
                .blocks
                .pop()
                .ok_or_else(|| rand::Error::new("exhausted"))?;
            dest.copy_from_slice(&block);
            Ok(())
        }
    }

    impl CryptoRng for CountingRng {}

    fn okm_for(s: &Scalar) -> [u8; 48] {
        // from_okm reads 48 big-endian bytes and reduces mod r
        let mut okm = [0u8; 48];
        okm[16..].copy_from_slice(&s.to_bytes_be());
        okm
    }

    #[test]
    fn issued_keys_satisfy_the_membership_equation() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, _osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();

        for _ in 0..3 {
            let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();
            assert!(verify_usk(&gpk, &usk));
        }
    }

    #[test]
    fn setup_derives_consistent_public_values() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let keys = setup(&ctx, &mut thread_rng()).unwrap();
        let gpk = keys.group_public_key();
        let osk = keys.opener_secret_key();

        assert_eq!(gpk.u * osk.xi1, gpk.h);
        assert_eq!(gpk.v * osk.xi2, gpk.h);
        assert_eq!(gpk.g2 * keys.issuer_secret_key().0, gpk.w);
    }

    #[test]
    fn tampered_member_key_is_rejected() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, _osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();
        let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();

        let wrong_x = UserSecretKey { a: usk.a, x: usk.x + Scalar::ONE };
        assert!(!verify_usk(&gpk, &wrong_x));

        let identity_a = UserSecretKey { a: G1Projective::IDENTITY, x: usk.x };
        assert!(!verify_usk(&gpk, &identity_a));

        let (other_gpk, _, _) = setup(&ctx, &mut rng).unwrap().into_parts();
        assert!(!verify_usk(&other_gpk, &usk));
    }

    #[test]
    fn keygen_resamples_degenerate_exponent() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let (gpk, _osk, isk) = setup(&ctx, &mut thread_rng()).unwrap().into_parts();

        // first draw gives x = -gamma, the second a regular value
        let good_x = Scalar::from(42u64);
        let mut rng = CountingRng {
            blocks: vec![okm_for(&good_x), okm_for(&(-isk.0))],
        };

        let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();
        assert_eq!(usk.x, good_x);
        assert!(verify_usk(&gpk, &usk));
    }

    #[test]
    fn keygen_gives_up_after_bounded_attempts() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let (gpk, _osk, isk) = setup(&ctx, &mut thread_rng()).unwrap().into_parts();

        let mut rng = CountingRng {
            blocks: vec![okm_for(&(-isk.0)); MAX_KEYGEN_ATTEMPTS],
        };

        assert!(matches!(
            user_keygen(&gpk, &isk, &mut rng),
            Err(Error::ArithmeticError(_))
        ));
    }

    #[test]
    fn key_encodings_round_trip() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let keys = setup(&ctx, &mut rng).unwrap();
        let usk = user_keygen(&keys.gpk, &keys.isk, &mut rng).unwrap();

        assert_eq!(GroupPublicKey::from_bytes(&keys.gpk.to_bytes()).unwrap(), keys.gpk);
        assert_eq!(OpenerSecretKey::from_bytes(&keys.osk.to_bytes()).unwrap(), keys.osk);
        assert_eq!(IssuerSecretKey::from_bytes(&keys.isk.to_bytes()).unwrap(), keys.isk);
        assert_eq!(UserSecretKey::from_bytes(&usk.to_bytes()).unwrap(), usk);

        assert_eq!(GroupPublicKey::decode(&keys.gpk.encode()).unwrap(), keys.gpk);
        assert_eq!(UserSecretKey::decode(&usk.encode()).unwrap(), usk);
    }

    #[test]
    fn key_encodings_have_pinned_widths() {
        assert_eq!(GroupPublicKey::BYTES, 384);
        assert_eq!(OpenerSecretKey::BYTES, 64);
        assert_eq!(IssuerSecretKey::BYTES, 32);
        assert_eq!(UserSecretKey::BYTES, 80);
    }

    #[test]
    fn truncated_keys_are_encoding_errors() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let keys = setup(&ctx, &mut rng).unwrap();
        let usk = user_keygen(&keys.gpk, &keys.isk, &mut rng).unwrap();

        let gpk = keys.gpk.to_bytes();
        assert!(matches!(
            GroupPublicKey::from_bytes(&gpk[..GroupPublicKey::BYTES - 1]),
            Err(Error::EncodingError(_))
        ));
        let usk = usk.to_bytes();
        assert!(matches!(
            UserSecretKey::from_bytes(&usk[1..]),
            Err(Error::EncodingError(_))
        ));
        assert!(matches!(
            OpenerSecretKey::from_bytes(&[]),
            Err(Error::EncodingError(_))
        ));
    }
}
