// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Key hash functions.
//!
//! The engine only talks to [`KeyHasher`]. Two implementations exist:
//!
//! - [`DivisionHash`]: `key mod divisor`, the home slot for the probing and chaining strategies.
//! - [`CustomHash`]: any caller supplied `u64 -> u64` function. The table reduces its output
//!   modulo the slot count, so the function may return any value.
//!
//! # Usage
//!
//! ```rust
//! use labhash::hash::CustomHash;
//! use labhash::hash::DivisionHash;
//! use labhash::hash::KeyHasher;
//!
//! let division = DivisionHash::new(7).unwrap();
//! assert_eq!(division.hash_key(23), 2);
//!
//! let mid_square = CustomHash::mid_square();
//! assert_eq!(mid_square.hash_key(12), 14); // 12 * 12 = 144
//! ```

use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;

use crate::error::Error;

/// A function from an integer key to a raw (unreduced) slot index.
pub trait KeyHasher {
    /// Hashes the key.
    fn hash_key(&self, key: u64) -> u64;
}

/// Division hashing: `key mod divisor`.
///
/// The divisor is checked once at construction, so hashing itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DivisionHash {
    divisor: NonZeroU64,
}

impl DivisionHash {
    /// Creates a division hash.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if `divisor`
    /// is zero.
    pub fn new(divisor: u64) -> Result<Self, Error> {
        let divisor = NonZeroU64::new(divisor)
            .ok_or_else(|| Error::config_invalid("divisor cannot be zero"))?;
        Ok(Self { divisor })
    }

    /// Returns the divisor.
    pub fn divisor(&self) -> u64 {
        self.divisor.get()
    }

    /// Returns the home index for `key`, always below the divisor.
    pub fn index(&self, key: u64) -> usize {
        (key % self.divisor) as usize
    }
}

impl KeyHasher for DivisionHash {
    fn hash_key(&self, key: u64) -> u64 {
        key % self.divisor
    }
}

/// A pluggable key hash function.
///
/// Cloning is cheap; clones share the same function.
#[derive(Clone)]
pub struct CustomHash {
    name: &'static str,
    func: Arc<dyn Fn(u64) -> u64 + Send + Sync>,
}

impl CustomHash {
    /// Wraps an arbitrary function.
    ///
    /// # Examples
    ///
    /// ```
    /// use labhash::hash::CustomHash;
    /// use labhash::hash::KeyHasher;
    ///
    /// let reverse = CustomHash::from_fn("reverse", |key| u64::MAX - key);
    /// assert_eq!(reverse.name(), "reverse");
    /// assert_eq!(reverse.hash_key(u64::MAX), 0);
    /// ```
    pub fn from_fn<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(u64) -> u64 + Send + Sync + 'static,
    {
        Self {
            name,
            func: Arc::new(func),
        }
    }

    /// The mid-square hash, see [`mid_square`].
    pub fn mid_square() -> Self {
        Self::from_fn("mid-square", mid_square)
    }

    /// The digit-sum hash reduced by `divisor`, see [`digit_sum`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if `divisor`
    /// is zero.
    pub fn digit_sum(divisor: u64) -> Result<Self, Error> {
        let divisor = NonZeroU64::new(divisor)
            .ok_or_else(|| Error::config_invalid("digit-sum divisor cannot be zero"))?;
        Ok(Self::from_fn("digit-sum", move |key| digit_sum(key) % divisor))
    }

    /// Returns the name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl KeyHasher for CustomHash {
    fn hash_key(&self, key: u64) -> u64 {
        (self.func)(key)
    }
}

impl fmt::Debug for CustomHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomHash").field(&self.name).finish()
    }
}

/// Mid-square hashing: square the key and read the middle two decimal digits.
///
/// For a square with `n` digits the window starts at digit `n / 2 - 1` (0-based, most
/// significant first). A square with fewer than two digits is treated as if left-padded
/// with zeros to two digits, so the result is the square itself.
pub fn mid_square(key: u64) -> u64 {
    let square = (key as u128) * (key as u128);
    let digits = if square == 0 { 1 } else { square.ilog10() + 1 };
    if digits < 2 {
        return square as u64;
    }
    let start = digits / 2 - 1;
    let dropped = digits - start - 2;
    ((square / 10u128.pow(dropped)) % 100) as u64
}

/// Sums the ASCII codes of the key's decimal digits.
pub fn digit_sum(key: u64) -> u64 {
    key.to_string().bytes().map(u64::from).sum()
}
