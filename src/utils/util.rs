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

use crate::errors::Error;

/// I2OSP as defined in RFC 8017: big-endian, left padded to `len` bytes.
/// Bytes of `value` beyond `len` are dropped.
pub fn i2osp(value: usize, len: usize) -> Vec<u8> {
    let be = (value as u64).to_be_bytes();
    if len >= be.len() {
        let mut out = vec![0u8; len - be.len()];
        out.extend_from_slice(&be);
        out
    } else {
        be[be.len() - len..].to_vec()
    }
}

/// Fails with [`Error::EncodingError`] unless `bytes` is exactly `len` long.
pub(crate) fn expect_len(bytes: &[u8], len: usize, what: &str) -> Result<(), Error> {
    if bytes.len() != len {
        return Err(Error::EncodingError(format!(
            "{} must be {} bytes, got {}",
            what,
            len,
            bytes.len()
        )));
    }
    Ok(())
}

pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, Error> {
    hex::decode(s).map_err(|e| Error::EncodingError(format!("invalid hex: {}", e)))
}

#[cfg(feature = "bbs04")]
pub mod bbs04_utils {
    use bls12_381_plus::Scalar;
    use elliptic_curve::hash2curve::{ExpandMsg, Expander};
    use ff::Field;

    use crate::{bbs04::ciphersuites::Bbs04Ciphersuite, errors::Error};

    /// hash_to_scalar from the BBS signatures draft: expand the message to
    /// `EXPAND_LEN` uniform bytes and reduce them modulo r. A trailing counter
    /// byte is appended and bumped until the result is non-zero.
    pub fn hash_to_scalar<CS>(msg_octets: &[u8], dst: &[u8]) -> Result<Scalar, Error>
    where
        CS: Bbs04Ciphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let mut uniform_bytes = vec![0u8; CS::EXPAND_LEN];
        let mut counter: u8 = 0;

        loop {
            let msg_prime = [msg_octets, &[counter]].concat();
            CS::Expander::expand_message(&[msg_prime.as_slice()], &[dst], CS::EXPAND_LEN)
                .map_err(|_| Error::HashToScalarError)?
                .fill_bytes(&mut uniform_bytes);

            let okm: &[u8; 48] = uniform_bytes
                .as_slice()
                .try_into()
                .map_err(|_| Error::HashToScalarError)?;
            let hashed_scalar = Scalar::from_okm(okm);

            if !bool::from(hashed_scalar.is_zero()) {
                return Ok(hashed_scalar);
            }

            counter = counter.checked_add(1).ok_or(Error::HashToScalarError)?;
        }
    }
}
