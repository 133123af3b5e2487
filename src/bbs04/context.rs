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

use core::marker::PhantomData;

use bls12_381_plus::{G1Projective, G2Projective, Scalar};
use elliptic_curve::{group::Group, hash2curve::ExpandMsg};
use rand::{CryptoRng, RngCore};

use super::ciphersuites::Bbs04Ciphersuite;
use crate::{
    ecgroup::{pairing::pair, point::hash_to_g1, scalar::scalar_random},
    errors::Error,
    utils::util::bbs04_utils::hash_to_scalar,
};

/// Immutable pairing parameters for one ciphersuite.
///
/// Built once with [`PairingContext::new`], which checks that the base points
/// pair to a non-trivial element, and then shared by reference with every
/// operation that hashes or samples under the ciphersuite. The context holds no
/// secrets and is `Send + Sync`.
#[derive(Clone, Debug)]
pub struct PairingContext<CS: Bbs04Ciphersuite> {
    g1_base: G1Projective,
    g2_base: G2Projective,
    _cs: PhantomData<CS>,
}

impl<CS> PairingContext<CS>
where
    CS: Bbs04Ciphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    pub fn new() -> Result<Self, Error> {
        let g1_base = hash_to_g1::<CS::Expander>(CS::GENERATOR_SEED, CS::GENERATOR_DST);
        let g2_base = G2Projective::GENERATOR;

        if bool::from(g1_base.is_identity()) {
            return Err(Error::InvalidPairingContext(
                "G1 base point is the identity".to_owned(),
            ));
        }

        if bool::from(pair(&g1_base, &g2_base).is_identity()) {
            return Err(Error::InvalidPairingContext(
                "degenerate pairing on the base points".to_owned(),
            ));
        }

        log::debug!(
            "pairing context ready for {}",
            String::from_utf8_lossy(CS::ID)
        );

        Ok(Self {
            g1_base,
            g2_base,
            _cs: PhantomData,
        })
    }

    pub fn g1_base(&self) -> &G1Projective {
        &self.g1_base
    }

    pub fn g2_base(&self) -> &G2Projective {
        &self.g2_base
    }

    pub fn ciphersuite_id(&self) -> &'static [u8] {
        CS::ID
    }

    /// Hash-to-curve under this ciphersuite's expander and DST.
    pub fn hash_to_g1(&self, msg: &[u8]) -> G1Projective {
        hash_to_g1::<CS::Expander>(msg, CS::GENERATOR_DST)
    }

    pub fn hash_to_scalar(&self, msg: &[u8], dst: &[u8]) -> Result<Scalar, Error> {
        hash_to_scalar::<CS>(msg, dst)
    }

    /// Uniformly random non-identity element of G1.
    pub fn random_g1<R>(&self, rng: &mut R) -> Result<G1Projective, Error>
    where
        R: RngCore + CryptoRng,
    {
        Ok(self.g1_base * scalar_random(rng)?)
    }

    pub fn random_g2<R>(&self, rng: &mut R) -> Result<G2Projective, Error>
    where
        R: RngCore + CryptoRng,
    {
        Ok(self.g2_base * scalar_random(rng)?)
    }
}
