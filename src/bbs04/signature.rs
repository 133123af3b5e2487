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

use bls12_381_plus::{G1Projective, Gt, Scalar};
use elliptic_curve::hash2curve::ExpandMsg;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::{
    ciphersuites::Bbs04Ciphersuite,
    context::PairingContext,
    keys::{GroupPublicKey, UserSecretKey},
};
use crate::{
    ecgroup::{
        pairing::{gt_to_bytes, multi_pair},
        point::{g1_from_bytes, g1_to_bytes, G1_BYTES},
        scalar::{n_random_scalars, ScalarExt, SCALAR_BYTES},
    },
    errors::Error,
    utils::util::{decode_hex, expect_len, i2osp},
};

/// Linear encryption `(T1, T2, T3)` of the signer's credential together with
/// the Fiat-Shamir proof `(c, s_alpha, s_beta, s_x, s_delta1, s_delta2)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GroupSignature {
    pub(crate) T1: G1Projective,
    pub(crate) T2: G1Projective,
    pub(crate) T3: G1Projective,
    pub(crate) c: Scalar,
    pub(crate) s_alpha: Scalar,
    pub(crate) s_beta: Scalar,
    pub(crate) s_x: Scalar,
    pub(crate) s_delta1: Scalar,
    pub(crate) s_delta2: Scalar,
}

impl GroupSignature {
    pub const BYTES: usize = 3 * G1_BYTES + 6 * SCALAR_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[0..48].copy_from_slice(&g1_to_bytes(&self.T1));
        bytes[48..96].copy_from_slice(&g1_to_bytes(&self.T2));
        bytes[96..144].copy_from_slice(&g1_to_bytes(&self.T3));

        let scalars = [
            &self.c,
            &self.s_alpha,
            &self.s_beta,
            &self.s_x,
            &self.s_delta1,
            &self.s_delta2,
        ];
        for (chunk, s) in bytes[144..].chunks_exact_mut(SCALAR_BYTES).zip(scalars) {
            chunk.copy_from_slice(&s.to_bytes_be());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        expect_len(bytes, Self::BYTES, "group signature")?;

        let T1 = g1_from_bytes(&bytes[0..48])?;
        let T2 = g1_from_bytes(&bytes[48..96])?;
        let T3 = g1_from_bytes(&bytes[96..144])?;

        let scalars = bytes[144..]
            .chunks_exact(SCALAR_BYTES)
            .map(Scalar::from_bytes_be)
            .collect::<Result<Vec<Scalar>, Error>>()?;

        Ok(Self {
            T1,
            T2,
            T3,
            c: scalars[0],
            s_alpha: scalars[1],
            s_beta: scalars[2],
            s_x: scalars[3],
            s_delta1: scalars[4],
            s_delta2: scalars[5],
        })
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(s: &str) -> Result<Self, Error> {
        Self::from_bytes(&decode_hex(s)?)
    }

    pub fn t1(&self) -> &G1Projective {
        &self.T1
    }

    pub fn t2(&self) -> &G1Projective {
        &self.T2
    }

    pub fn t3(&self) -> &G1Projective {
        &self.T3
    }

    pub fn challenge(&self) -> &Scalar {
        &self.c
    }
}

/// Signs `message` on behalf of the group.
///
/// # Description
/// Encrypts the credential `A` under the opener's key `(u, v, h)` and proves,
/// with a Fiat-Shamir transformed sigma protocol, knowledge of `(alpha, beta,
/// x, alpha*x, beta*x)` such that the ciphertext opens to a valid credential.
///
/// # Inputs:
/// * `ctx` (REQUIRED), pairing context of the ciphersuite.
/// * `gpk` (REQUIRED), group public key.
/// * `usk` (REQUIRED), the signer's member key.
/// * `message` (REQUIRED), arbitrary octets bound into the challenge.
/// * `rng` (REQUIRED), a cryptographically secure RNG.
///
/// # Output:
/// * a new [`GroupSignature`], or [`Error::RandomnessFailure`].
pub fn sign<CS, R>(
    ctx: &PairingContext<CS>,
    gpk: &GroupPublicKey,
    usk: &UserSecretKey,
    message: &[u8],
    rng: &mut R,
) -> Result<GroupSignature, Error>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
    R: RngCore + CryptoRng,
{
    let random_scalars = n_random_scalars(rng, 7)?;

    let init_res = sign_init(gpk, usk, &random_scalars)?;
    let challenge = challenge_calculate(ctx, gpk, &init_res, message)?;
    let signature = sign_finalize(&init_res, challenge, usk, &random_scalars)?;

    log::debug!("group signature produced");

    Ok(signature)
}

/// Checks a group signature on `message`.
///
/// Recomputes the commitments from the responses and accepts iff the
/// recomputed challenge equals the one carried by the signature.
pub fn verify<CS>(
    ctx: &PairingContext<CS>,
    gpk: &GroupPublicKey,
    signature: &GroupSignature,
    message: &[u8],
) -> bool
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let init_res = verify_init(gpk, signature);

    match challenge_calculate(ctx, gpk, &init_res, message) {
        Ok(challenge) if challenge == signature.c => true,
        Ok(_) => {
            log::debug!("group signature rejected: challenge mismatch");
            false
        }
        Err(e) => {
            log::debug!("group signature rejected: {}", e);
            false
        }
    }
}

struct SignInitResult {
    T1: G1Projective,
    T2: G1Projective,
    T3: G1Projective,
    R1: G1Projective,
    R2: G1Projective,
    R3: Gt,
    R4: G1Projective,
    R5: G1Projective,
}

fn sign_init(
    gpk: &GroupPublicKey,
    usk: &UserSecretKey,
    random_scalars: &[Scalar],
) -> Result<SignInitResult, Error> {
    if random_scalars.len() != 7 {
        return Err(Error::ArithmeticError("Random scalars not valid".to_owned()));
    }

    let alpha = random_scalars[0];
    let beta = random_scalars[1];
    let r_alpha = random_scalars[2];
    let r_beta = random_scalars[3];
    let r_x = random_scalars[4];
    let r_delta1 = random_scalars[5];
    let r_delta2 = random_scalars[6];

    let T1 = gpk.u * alpha;
    let T2 = gpk.v * beta;
    let T3 = usk.a + gpk.h * (alpha + beta);

    let R1 = gpk.u * r_alpha;
    let R2 = gpk.v * r_beta;
    let R3 = multi_pair(&[
        (T3 * r_x - gpk.h * (r_delta1 + r_delta2), gpk.g2),
        (-(gpk.h * (r_alpha + r_beta)), gpk.w),
    ]);
    let R4 = T1 * r_x - gpk.u * r_delta1;
    let R5 = T2 * r_x - gpk.v * r_delta2;

    Ok(SignInitResult { T1, T2, T3, R1, R2, R3, R4, R5 })
}

fn verify_init(gpk: &GroupPublicKey, signature: &GroupSignature) -> SignInitResult {
    let GroupSignature {
        T1,
        T2,
        T3,
        c,
        s_alpha,
        s_beta,
        s_x,
        s_delta1,
        s_delta2,
    } = *signature;

    let R1 = gpk.u * s_alpha - T1 * c;
    let R2 = gpk.v * s_beta - T2 * c;
    let R3 = multi_pair(&[
        (T3 * s_x - gpk.h * (s_delta1 + s_delta2) - gpk.g1 * c, gpk.g2),
        (T3 * c - gpk.h * (s_alpha + s_beta), gpk.w),
    ]);
    let R4 = T1 * s_x - gpk.u * s_delta1;
    let R5 = T2 * s_x - gpk.v * s_delta2;

    SignInitResult { T1, T2, T3, R1, R2, R3, R4, R5 }
}

/// `gpk || T1 || T2 || T3 || R1 || R2 || R3 || R4 || R5 || I2OSP(len(msg), 8) || msg`
fn challenge_calculate<CS>(
    ctx: &PairingContext<CS>,
    gpk: &GroupPublicKey,
    init_res: &SignInitResult,
    message: &[u8],
) -> Result<Scalar, Error>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let challenge_dst = CS::challenge_dst();

    let mut c_arr: Vec<u8> = Vec::new();
    c_arr.extend_from_slice(&gpk.to_bytes());
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.T1));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.T2));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.T3));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.R1));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.R2));
    c_arr.extend_from_slice(&gt_to_bytes(&init_res.R3));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.R4));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.R5));
    c_arr.extend_from_slice(&i2osp(message.len(), 8));
    c_arr.extend_from_slice(message);

    ctx.hash_to_scalar(&c_arr, &challenge_dst)
}

fn sign_finalize(
    init_res: &SignInitResult,
    challenge: Scalar,
    usk: &UserSecretKey,
    random_scalars: &[Scalar],
) -> Result<GroupSignature, Error> {
    if random_scalars.len() != 7 {
        return Err(Error::ArithmeticError("Random scalars not valid".to_owned()));
    }

    let alpha = random_scalars[0];
    let beta = random_scalars[1];
    let r_alpha = random_scalars[2];
    let r_beta = random_scalars[3];
    let r_x = random_scalars[4];
    let r_delta1 = random_scalars[5];
    let r_delta2 = random_scalars[6];

    let x = usk.x;

    Ok(GroupSignature {
        T1: init_res.T1,
        T2: init_res.T2,
        T3: init_res.T3,
        c: challenge,
        s_alpha: r_alpha + challenge * alpha,
        s_beta: r_beta + challenge * beta,
        s_x: r_x + challenge * x,
        s_delta1: r_delta1 + challenge * (x * alpha),
        s_delta2: r_delta2 + challenge * (x * beta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs04::{ciphersuites::Bls12381Sha256, keys::{setup, user_keygen}};
    use rand::thread_rng;

    #[test]
    fn verifier_recomputes_signer_transcript() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, _osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();
        let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();

        let random_scalars = n_random_scalars(&mut rng, 7).unwrap();
        let init_res = sign_init(&gpk, &usk, &random_scalars).unwrap();
        let c = challenge_calculate(&ctx, &gpk, &init_res, b"transcript").unwrap();
        let signature = sign_finalize(&init_res, c, &usk, &random_scalars).unwrap();

        let verify_res = verify_init(&gpk, &signature);
        assert_eq!(verify_res.R1, init_res.R1);
        assert_eq!(verify_res.R2, init_res.R2);
        assert_eq!(verify_res.R3, init_res.R3);
        assert_eq!(verify_res.R4, init_res.R4);
        assert_eq!(verify_res.R5, init_res.R5);

        // transcripts agree byte for byte, hence the challenges do too
        let c_verify = challenge_calculate(&ctx, &gpk, &verify_res, b"transcript").unwrap();
        assert_eq!(c, c_verify);
    }

    #[test]
    fn challenge_binds_the_message_length() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, _osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();
        let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();

        let random_scalars = n_random_scalars(&mut rng, 7).unwrap();
        let init_res = sign_init(&gpk, &usk, &random_scalars).unwrap();

        let c1 = challenge_calculate(&ctx, &gpk, &init_res, b"").unwrap();
        let c2 = challenge_calculate(&ctx, &gpk, &init_res, &[0u8]).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn wrong_number_of_random_scalars() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, _osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();
        let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();

        let random_scalars = n_random_scalars(&mut rng, 6).unwrap();
        assert!(sign_init(&gpk, &usk, &random_scalars).is_err());
    }

    #[test]
    fn signature_width_is_pinned() {
        assert_eq!(GroupSignature::BYTES, 336);
    }
}
