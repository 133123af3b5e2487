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

//! The [BBS04 short group signature](https://crypto.stanford.edu/~dabo/pubs/papers/groupsigs.pdf)
//! of Boneh, Boyen and Shacham.
//! Any member of a group can sign on behalf of the group: a verifier learns that
//! the signer holds a credential issued for the group, but not which member signed.
//! A designated opener can trace every signature back to the signer's credential.
//! - **Issuer**: holds `gamma` and issues member keys `(A, x)` with `A = g1^(1/(gamma + x))`.
//! - **Opener**: holds `(xi1, xi2)` and decrypts the credential carried by a signature.
//! - **Members**: sign messages with a zero-knowledge proof that the encrypted
//!                credential satisfies the membership equation.
//!
//! Every signature is 336 bytes. Operations that hash to the curve or to a scalar
//! take a [`PairingContext`](context::PairingContext) fixing the ciphersuite.
//! # Usage
//! The scheme is behind the `bbs04` feature, enabled by default.
//! ```toml
//! bbsgs = { version = "0.1", default-features = false, features = ["bbs04"] }
//! ```

/// Module for ciphersuites
pub mod ciphersuites;
/// Module for the pairing context
pub mod context;
/// Module for group, issuer, opener and member keys
pub mod keys;
/// Module for opening signatures
pub mod open;
/// Module for signatures
pub mod signature;
