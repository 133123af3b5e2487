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

//! Byte-oriented entry points.
//!
//! Every function decodes all of its inputs (rejecting malformed encodings with
//! [`Error::EncodingError`] or [`Error::NotInSubgroup`]) before doing any group
//! arithmetic, and returns owned buffers. Randomness comes from [`OsRng`].

use bls12_381_plus::Scalar;
use elliptic_curve::hash2curve::ExpandMsg;
use rand::rngs::OsRng;

use crate::{
    bbs04::{
        ciphersuites::Bbs04Ciphersuite,
        context::PairingContext,
        keys::{self, GroupPublicKey, IssuerSecretKey, OpenerSecretKey, UserSecretKey},
        open as opener,
        signature::{self, GroupSignature},
    },
    ecgroup::{
        point::{g1_from_bytes, g1_to_bytes},
        scalar::{self, ScalarExt},
    },
    errors::Error,
};

/// Encoded group material as returned by [`setup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedGroupKeys {
    pub gpk: Vec<u8>,
    pub osk: Vec<u8>,
    pub isk: Vec<u8>,
}

/// # Output:
/// * 384-byte gpk, 64-byte osk and 32-byte isk.
pub fn setup<CS>(ctx: &PairingContext<CS>) -> Result<EncodedGroupKeys, Error>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let (gpk, osk, isk) = keys::setup(ctx, &mut OsRng)?.into_parts();

    Ok(EncodedGroupKeys {
        gpk: gpk.to_bytes().to_vec(),
        osk: osk.to_bytes().to_vec(),
        isk: isk.to_bytes().to_vec(),
    })
}

/// # Output:
/// * 80-byte member key `A || x`.
pub fn user_keygen(gpk: &[u8], isk: &[u8]) -> Result<Vec<u8>, Error> {
    let gpk = GroupPublicKey::from_bytes(gpk)?;
    let isk = IssuerSecretKey::from_bytes(isk)?;

    let usk = keys::user_keygen(&gpk, &isk, &mut OsRng)?;
    Ok(usk.to_bytes().to_vec())
}

pub fn verify_usk(gpk: &[u8], usk: &[u8]) -> Result<bool, Error> {
    let gpk = GroupPublicKey::from_bytes(gpk)?;
    let usk = UserSecretKey::from_bytes(usk)?;

    Ok(keys::verify_usk(&gpk, &usk))
}

/// # Output:
/// * 336-byte signature.
pub fn sign<CS>(
    ctx: &PairingContext<CS>,
    gpk: &[u8],
    usk: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, Error>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let gpk = GroupPublicKey::from_bytes(gpk)?;
    let usk = UserSecretKey::from_bytes(usk)?;

    let signature = signature::sign(ctx, &gpk, &usk, message, &mut OsRng)?;
    Ok(signature.to_bytes().to_vec())
}

/// `Ok(false)` for a well-formed signature that does not verify, `Err` for
/// malformed input.
pub fn verify<CS>(
    ctx: &PairingContext<CS>,
    gpk: &[u8],
    sig: &[u8],
    message: &[u8],
) -> Result<bool, Error>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let gpk = GroupPublicKey::from_bytes(gpk)?;
    let sig = GroupSignature::from_bytes(sig)?;

    Ok(signature::verify(ctx, &gpk, &sig, message))
}

/// # Output:
/// * 48-byte credential `A` of the signer.
pub fn open(gpk: &[u8], osk: &[u8], sig: &[u8]) -> Result<Vec<u8>, Error> {
    let gpk = GroupPublicKey::from_bytes(gpk)?;
    let osk = OpenerSecretKey::from_bytes(osk)?;
    let sig = GroupSignature::from_bytes(sig)?;

    Ok(opener::open(&gpk, &osk, &sig).to_bytes().to_vec())
}

/// 32-byte big-endian scalar in `[1, r-1]`.
pub fn scalar_random() -> Result<Vec<u8>, Error> {
    Ok(scalar::scalar_random(&mut OsRng)?.to_bytes_be().to_vec())
}

pub fn scalar_inverse(s: &[u8]) -> Result<Vec<u8>, Error> {
    let s = Scalar::from_bytes_be(s)?;
    Ok(scalar::scalar_inverse(&s)?.to_bytes_be().to_vec())
}

/// Hashes `message` to G1 under the context's ciphersuite.
pub fn g1_hash_to_point<CS>(ctx: &PairingContext<CS>, message: &[u8]) -> Vec<u8>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    g1_to_bytes(&ctx.hash_to_g1(message)).to_vec()
}

pub fn g1_mul(point: &[u8], s: &[u8]) -> Result<Vec<u8>, Error> {
    let point = g1_from_bytes(point)?;
    let s = Scalar::from_bytes_be(s)?;

    Ok(g1_to_bytes(&(point * s)).to_vec())
}
