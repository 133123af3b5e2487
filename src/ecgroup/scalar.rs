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

use bls12_381_plus::Scalar;
use ff::Field;
use rand::{CryptoRng, RngCore};

use crate::errors::Error;

pub const SCALAR_BYTES: usize = Scalar::BYTES;

// 48 bytes of entropy reduced mod r keep the bias below 2^-128
const OKM_LEN: usize = 48;

const MAX_SAMPLING_ATTEMPTS: usize = 16;

/// Samples a uniform scalar in `[1, r-1]`.
///
/// Fails with [`Error::RandomnessFailure`] if the RNG reports an error or keeps
/// producing output that reduces to zero.
pub fn scalar_random<R>(rng: &mut R) -> Result<Scalar, Error>
where
    R: RngCore + CryptoRng,
{
    let mut buf = [0u8; OKM_LEN];
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| Error::RandomnessFailure(e.to_string()))?;
        let scalar = Scalar::from_okm(&buf);
        if !bool::from(scalar.is_zero()) {
            return Ok(scalar);
        }
    }

    Err(Error::RandomnessFailure(
        "entropy source keeps returning degenerate output".to_owned(),
    ))
}

pub fn n_random_scalars<R>(rng: &mut R, n: usize) -> Result<Vec<Scalar>, Error>
where
    R: RngCore + CryptoRng,
{
    (0..n).map(|_| scalar_random(rng)).collect()
}

/// Multiplicative inverse modulo r.
pub fn scalar_inverse(s: &Scalar) -> Result<Scalar, Error> {
    Option::<Scalar>::from(s.invert())
        .ok_or_else(|| Error::DomainError("cannot invert the zero scalar".to_owned()))
}

pub trait ScalarExt: Sized {
    fn to_bytes_be(&self) -> [u8; SCALAR_BYTES];
    fn from_bytes_be(bytes: &[u8]) -> Result<Self, Error>;
}

impl ScalarExt for Scalar {
    fn to_bytes_be(&self) -> [u8; SCALAR_BYTES] {
        self.to_be_bytes()
    }

    /// Rejects anything that is not exactly 32 bytes or not reduced modulo r.
    fn from_bytes_be(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; SCALAR_BYTES] = bytes.try_into().map_err(|_| {
            Error::EncodingError(format!(
                "scalar must be {} bytes, got {}",
                SCALAR_BYTES,
                bytes.len()
            ))
        })?;

        Option::<Scalar>::from(Scalar::from_be_bytes(&bytes)).ok_or_else(|| {
            Error::EncodingError("scalar is not reduced modulo the group order".to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0)
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for BrokenRng {}

    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    impl CryptoRng for ZeroRng {}

    #[test]
    fn inverse_of_random_scalar() {
        let mut rng = thread_rng();
        for _ in 0..16 {
            let s = scalar_random(&mut rng).unwrap();
            assert!(!bool::from(s.is_zero()));
            assert_eq!(scalar_inverse(&s).unwrap() * s, Scalar::ONE);
        }
    }

    #[test]
    fn inverse_of_zero_is_a_domain_error() {
        assert!(matches!(
            scalar_inverse(&Scalar::ZERO),
            Err(Error::DomainError(_))
        ));
    }

    #[test]
    fn random_scalars_are_distinct() {
        let mut rng = thread_rng();
        let scalars = n_random_scalars(&mut rng, 8).unwrap();
        for i in 0..scalars.len() {
            for j in (i + 1)..scalars.len() {
                assert_ne!(scalars[i], scalars[j]);
            }
        }
    }

    #[test]
    fn failing_rng_surfaces_randomness_failure() {
        assert!(matches!(
            scalar_random(&mut BrokenRng),
            Err(Error::RandomnessFailure(_))
        ));
        assert!(matches!(
            scalar_random(&mut ZeroRng),
            Err(Error::RandomnessFailure(_))
        ));
    }

    #[test]
    fn scalar_encoding_is_big_endian() {
        let bytes = Scalar::from(258u64).to_bytes_be();
        assert_eq!(bytes[SCALAR_BYTES - 1], 2);
        assert_eq!(bytes[SCALAR_BYTES - 2], 1);
        assert!(bytes[..SCALAR_BYTES - 2].iter().all(|b| *b == 0));

        let s = scalar_random(&mut thread_rng()).unwrap();
        assert_eq!(Scalar::from_bytes_be(&s.to_bytes_be()).unwrap(), s);
    }

    #[test]
    fn scalar_decoding_rejects_bad_input() {
        assert!(matches!(
            Scalar::from_bytes_be(&[1u8; 31]),
            Err(Error::EncodingError(_))
        ));
        assert!(matches!(
            Scalar::from_bytes_be(&[1u8; 33]),
            Err(Error::EncodingError(_))
        ));
        // 2^256 - 1 is far above r
        assert!(matches!(
            Scalar::from_bytes_be(&[0xffu8; 32]),
            Err(Error::EncodingError(_))
        ));
        // r - 1 is the largest valid value
        let r_minus_one = (-Scalar::ONE).to_bytes_be();
        assert_eq!(Scalar::from_bytes_be(&r_minus_one).unwrap(), -Scalar::ONE);
    }

    #[test]
    fn modular_arithmetic_wraps() {
        let minus_one = -Scalar::ONE;
        assert_eq!(minus_one + Scalar::ONE, Scalar::ZERO);
        assert_eq!(Scalar::ZERO - Scalar::ONE, minus_one);
        assert_eq!(minus_one * minus_one, Scalar::ONE);
    }
}
