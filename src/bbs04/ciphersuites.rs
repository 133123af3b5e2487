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

use core::fmt::Debug;

use digest::HashMarker;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd, ExpandMsgXof};
use sha2::Sha256;
use sha3::Shake256;

pub trait Bbs04Ciphersuite: Clone + Debug + Eq + Send + Sync + 'static {
    const ID: &'static [u8];
    /// Seed hashed to G1 to obtain the base point of a pairing context
    const GENERATOR_SEED: &'static [u8];
    /// Domain separation tag for hash-to-curve
    const GENERATOR_DST: &'static [u8];
    const EXPAND_LEN: usize = 48;
    type HashAlg: HashMarker;
    type Expander: ExpandMsg<'static>;

    /// Domain separation tag of the Fiat-Shamir challenge
    fn challenge_dst() -> Vec<u8> {
        [Self::ID, b"H2S_"].concat()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Bls12381Shake256 {}
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Bls12381Sha256 {}

impl Bbs04Ciphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"BBS04_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";
    const GENERATOR_SEED: &'static [u8] =
        b"BBS04_BLS12381G1_XOF:SHAKE-256_SSWU_RO_BP_GENERATOR_SEED";
    const GENERATOR_DST: &'static [u8] = b"BBS04_BLS12381G1_XOF:SHAKE-256_SSWU_RO_GENERATOR_DST_";
    type HashAlg = Shake256;
    type Expander = ExpandMsgXof<Self::HashAlg>;
}

impl Bbs04Ciphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"BBS04_BLS12381G1_XMD:SHA-256_SSWU_RO_";
    const GENERATOR_SEED: &'static [u8] = b"BBS04_BLS12381G1_XMD:SHA-256_SSWU_RO_BP_GENERATOR_SEED";
    const GENERATOR_DST: &'static [u8] = b"BBS04_BLS12381G1_XMD:SHA-256_SSWU_RO_GENERATOR_DST_";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}
