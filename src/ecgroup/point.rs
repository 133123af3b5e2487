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

use bls12_381_plus::{G1Affine, G1Projective, G2Affine, G2Projective};
use elliptic_curve::{group::Curve, hash2curve::ExpandMsg};

use crate::errors::Error;

pub const G1_BYTES: usize = G1Affine::COMPRESSED_BYTES;
pub const G2_BYTES: usize = G2Affine::COMPRESSED_BYTES;

/// Hashes `msg` to G1 with the SSWU random-oracle construction of RFC 9380.
///
/// Equal inputs give equal points; nobody knows the discrete log of the output
/// with respect to any other generator.
pub fn hash_to_g1<X>(msg: &[u8], dst: &[u8]) -> G1Projective
where
    X: for<'a> ExpandMsg<'a>,
{
    G1Projective::hash::<X>(msg, dst)
}

pub fn g1_to_bytes(p: &G1Projective) -> [u8; G1_BYTES] {
    p.to_affine().to_compressed()
}

pub fn g2_to_bytes(p: &G2Projective) -> [u8; G2_BYTES] {
    p.to_affine().to_compressed()
}

/// Decodes a compressed G1 point.
///
/// A wrong length, invalid flag bits or an x coordinate with no point above it
/// is an [`Error::EncodingError`]; a curve point outside the r-torsion is
/// [`Error::NotInSubgroup`].
pub fn g1_from_bytes(bytes: &[u8]) -> Result<G1Projective, Error> {
    let bytes: [u8; G1_BYTES] = bytes.try_into().map_err(|_| {
        Error::EncodingError(format!(
            "G1 point must be {} bytes, got {}",
            G1_BYTES,
            bytes.len()
        ))
    })?;

    let point = Option::<G1Affine>::from(G1Affine::from_compressed_unchecked(&bytes))
        .ok_or_else(|| Error::EncodingError("bytes do not encode a point on G1".to_owned()))?;

    if !bool::from(point.is_torsion_free()) {
        return Err(Error::NotInSubgroup("G1".to_owned()));
    }

    Ok(G1Projective::from(point))
}

/// G2 counterpart of [`g1_from_bytes`].
pub fn g2_from_bytes(bytes: &[u8]) -> Result<G2Projective, Error> {
    let bytes: [u8; G2_BYTES] = bytes.try_into().map_err(|_| {
        Error::EncodingError(format!(
            "G2 point must be {} bytes, got {}",
            G2_BYTES,
            bytes.len()
        ))
    })?;

    let point = Option::<G2Affine>::from(G2Affine::from_compressed_unchecked(&bytes))
        .ok_or_else(|| Error::EncodingError("bytes do not encode a point on G2".to_owned()))?;

    if !bool::from(point.is_torsion_free()) {
        return Err(Error::NotInSubgroup("G2".to_owned()));
    }

    Ok(G2Projective::from(point))
}
