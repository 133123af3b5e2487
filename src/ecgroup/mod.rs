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

//! Arithmetic layer over BLS12-381.
//!
//! Field, curve and pairing arithmetic come from `bls12_381_plus`; this module
//! adds what the protocol needs on top of it:
//! - **Scalars**: uniform sampling in `[1, r-1]`, checked inversion and a
//!   validated 32-byte big-endian encoding.
//! - **Points**: compressed encodings for G1 and G2 that reject malformed bytes
//!   and points outside the prime-order subgroup as distinct errors, plus
//!   hash-to-curve on G1.
//! - **Pairings**: single pairings and multi-pairings sharing one final
//!   exponentiation.

/// Module for G1/G2 point encodings and hash-to-curve
pub mod point;
/// Module for pairings
pub mod pairing;
/// Module for scalar arithmetic
pub mod scalar;

pub use bls12_381_plus::{G1Projective, G2Projective, Gt, Scalar};
