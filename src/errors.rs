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

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Scalar out of range for the requested operation (e.g. inverting zero)
    #[error("Domain error: {0}")]
    DomainError(String),
    /// Wrong length, bad flag bits or a coordinate that is not on the curve
    #[error("Encoding error: {0}")]
    EncodingError(String),
    /// The point is on the curve but outside the prime-order subgroup
    #[error("Point not in the prime-order subgroup: {0}")]
    NotInSubgroup(String),
    #[error("Arithmetic error: {0}")]
    ArithmeticError(String),
    #[error("Randomness source failure: {0}")]
    RandomnessFailure(String),
    #[error("Error during hash to scalar computation")]
    HashToScalarError,
    #[error("Invalid pairing context: {0}")]
    InvalidPairingContext(String),
}
