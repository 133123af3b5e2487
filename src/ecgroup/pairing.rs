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

use bls12_381_plus::{
    multi_miller_loop, pairing, G1Affine, G1Projective, G2Prepared, G2Projective, Gt,
};
use group::{Curve, Group};

/// Size of the canonical GT encoding (an element of Fp12).
pub const GT_BYTES: usize = 576;

/// Optimal ate pairing e(P, Q).
pub fn pair(p: &G1Projective, q: &G2Projective) -> Gt {
    pairing(&p.to_affine(), &q.to_affine())
}

/// Product of e(P_i, Q_i) over all terms with a single final exponentiation.
///
/// The terms are taken as an immutable slice: the whole batch is assembled
/// before the Miller loops start.
pub fn multi_pair(terms: &[(G1Projective, G2Projective)]) -> Gt {
    let prepared: Vec<(G1Affine, G2Prepared)> = terms
        .iter()
        .map(|(p, q)| (p.to_affine(), G2Prepared::from(q.to_affine())))
        .collect();

    let refs: Vec<(&G1Affine, &G2Prepared)> = prepared.iter().map(|(p, q)| (p, q)).collect();

    multi_miller_loop(&refs).final_exponentiation()
}

/// `true` iff the product of the pairings is the identity of GT.
pub fn pairing_product_is_identity(terms: &[(G1Projective, G2Projective)]) -> bool {
    multi_pair(terms).is_identity().into()
}

/// Canonical encoding of a GT element, used only as Fiat-Shamir hash input.
pub fn gt_to_bytes(gt: &Gt) -> Vec<u8> {
    gt.to_bytes().as_ref().to_vec()
}
