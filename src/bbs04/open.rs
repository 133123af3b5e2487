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

use bls12_381_plus::G1Projective;
use serde::{Deserialize, Serialize};

use super::{
    keys::{GroupPublicKey, OpenerSecretKey},
    signature::GroupSignature,
};
use crate::{
    ecgroup::point::{g1_from_bytes, g1_to_bytes, G1_BYTES},
    errors::Error,
    utils::util::decode_hex,
};

/// A member's credential `A`, the value that traces a signature to its signer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Credential(pub(crate) G1Projective);

impl Credential {
    pub const BYTES: usize = G1_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        g1_to_bytes(&self.0)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(g1_from_bytes(bytes)?))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn decode(s: &str) -> Result<Self, Error> {
        Self::from_bytes(&decode_hex(s)?)
    }

    pub fn point(&self) -> &G1Projective {
        &self.0
    }
}

/// Recovers the signer's credential: `A = T3 - (xi1 * T1 + xi2 * T2)`.
///
/// The proof is not re-checked here, run [`verify`](super::signature::verify)
/// first. `_gpk` is accepted so that every group operation takes the group it
/// acts on.
pub fn open(
    _gpk: &GroupPublicKey,
    osk: &OpenerSecretKey,
    signature: &GroupSignature,
) -> Credential {
    let a = signature.T3 - (signature.T1 * osk.xi1 + signature.T2 * osk.xi2);

    log::debug!("credential opened");

    Credential(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs04::{
        ciphersuites::Bls12381Sha256,
        context::PairingContext,
        keys::{setup, user_keygen},
        signature::sign,
    };
    use rand::thread_rng;

    #[test]
    fn opener_traces_each_member() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();

        let alice = user_keygen(&gpk, &isk, &mut rng).unwrap();
        let bob = user_keygen(&gpk, &isk, &mut rng).unwrap();

        let sig_alice = sign(&ctx, &gpk, &alice, b"m", &mut rng).unwrap();
        let sig_bob = sign(&ctx, &gpk, &bob, b"m", &mut rng).unwrap();

        assert_eq!(open(&gpk, &osk, &sig_alice), alice.credential());
        assert_eq!(open(&gpk, &osk, &sig_bob), bob.credential());
        assert_ne!(open(&gpk, &osk, &sig_alice), open(&gpk, &osk, &sig_bob));
    }

    #[test]
    fn wrong_opener_key_does_not_trace() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let mut rng = thread_rng();
        let (gpk, _osk, isk) = setup(&ctx, &mut rng).unwrap().into_parts();
        let (_, other_osk, _) = setup(&ctx, &mut rng).unwrap().into_parts();

        let usk = user_keygen(&gpk, &isk, &mut rng).unwrap();
        let sig = sign(&ctx, &gpk, &usk, b"m", &mut rng).unwrap();

        assert_ne!(open(&gpk, &other_osk, &sig), usk.credential());
    }

    #[test]
    fn credential_encoding() {
        let ctx = PairingContext::<Bls12381Sha256>::new().unwrap();
        let cred = Credential(ctx.random_g1(&mut thread_rng()).unwrap());
        assert_eq!(Credential::from_bytes(&cred.to_bytes()).unwrap(), cred);
        assert_eq!(Credential::decode(&cred.encode()).unwrap(), cred);
        assert!(matches!(
            Credential::from_bytes(&cred.to_bytes()[..47]),
            Err(Error::EncodingError(_))
        ));
    }
}
