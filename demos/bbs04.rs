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

#[cfg(feature = "bbs04")]
mod bbs04_example {
    use bbsgs::{
        bbs04::{
            ciphersuites::Bbs04Ciphersuite,
            context::PairingContext,
            keys::{setup, user_keygen, verify_usk},
            open::open,
            signature::{sign, verify},
        },
        errors::Error,
    };
    use elliptic_curve::hash2curve::ExpandMsg;

    pub(crate) fn bbs04_main<CS>() -> Result<(), Error>
    where
        CS: Bbs04Ciphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        const MSG: &str = "9872ad089e452c7b6e283dfac2a80d58e8d0ff71cc4d5e310a1debdda4a45f02";

        let mut rng = rand::thread_rng();

        log::info!("Pairing context");
        let ctx = PairingContext::<CS>::new()?;

        log::info!("Group Setup");
        let (gpk, osk, isk) = setup(&ctx, &mut rng)?.into_parts();
        log::info!("GPK: {}", gpk.encode());

        log::info!("Member Key Issuance...");
        let alice = user_keygen(&gpk, &isk, &mut rng)?;
        let bob = user_keygen(&gpk, &isk, &mut rng)?;
        assert!(verify_usk(&gpk, &alice), "Alice's member key is INVALID!");
        assert!(verify_usk(&gpk, &bob), "Bob's member key is INVALID!");
        log::info!("Alice credential: {}", alice.credential().encode());
        log::info!("Bob credential:   {}", bob.credential().encode());

        let message = hex::decode(MSG).map_err(|e| Error::EncodingError(e.to_string()))?;

        log::info!("Group Signature Computation...");
        let signature = sign(&ctx, &gpk, &alice, &message, &mut rng)?;
        log::info!("Signature: {}", signature.encode());

        assert!(
            verify(&ctx, &gpk, &signature, &message),
            "Signature verification FAILED!"
        );
        log::info!("Signature is VALID");

        log::info!("Opening the Signature...");
        let credential = open(&gpk, &osk, &signature);
        log::info!("Opened credential: {}", credential.encode());
        assert_eq!(credential, alice.credential(), "Signature does not trace to Alice!");
        log::info!("Signature was produced by Alice");

        Ok(())
    }
}

#[cfg(feature = "bbs04")]
fn main() {
    use crate::bbs04_example::bbs04_main;
    use bbsgs::bbs04::ciphersuites::{Bls12381Sha256, Bls12381Shake256};
    use std::env;

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    let result = match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            bbs04_main::<Bls12381Sha256>()
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            bbs04_main::<Bls12381Shake256>()
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
            return;
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
    }
}

#[cfg(not(feature = "bbs04"))]
fn main() {}
