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

use std::fmt;
use std::ops::Add;
use std::ops::AddAssign;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::CustomHash;
use crate::hash::DivisionHash;
use crate::hash::KeyHasher;
use crate::probe::LinearProbe;
use crate::probe::ProbeSequence;
use crate::probe::QuadraticProbe;
use crate::probe::find_empty;
use crate::render;
use crate::slot::Chain;
use crate::slot::Slot;

/// Default divisor for division hashing
pub const DEFAULT_DIVISOR: u64 = 113;

/// Default bucket size (slot multiplier)
pub const DEFAULT_BUCKET_SIZE: usize = 1;

/// Largest key accepted by default
pub const DEFAULT_MAX_KEY: u64 = 99_999;

/// Upper bound on `bucket_size * divisor`
pub const MAX_TOTAL_SLOTS: usize = 1 << 26;

/// Collision resolution strategy of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Open addressing with a fixed step.
    Linear,
    /// Open addressing with quadratic offsets from the home slot.
    Quadratic,
    /// A list of keys per slot.
    Chaining,
    /// Direct placement by a custom hash; a taken slot is overwritten.
    Custom,
}

impl Strategy {
    /// Lower-case name, as used in output file names.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Linear => "linear",
            Strategy::Quadratic => "quadratic",
            Strategy::Chaining => "chaining",
            Strategy::Custom => "custom",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counters produced by one insertion. Sum them with `+=` across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertStats {
    /// Times the chosen slot already held a key.
    ///
    /// Only the custom strategy can bump this: the probing strategies always land on an
    /// empty slot and chaining never collides at slot level.
    pub collisions: u64,
    /// Key comparisons. No strategy compares keys, so this stays zero.
    pub comparisons: u64,
    /// Keys that were not stored. `insert` reports failures as errors, so only batch
    /// drivers bump this.
    pub not_inserted: u64,
}

impl AddAssign for InsertStats {
    fn add_assign(&mut self, rhs: Self) {
        self.collisions += rhs.collisions;
        self.comparisons += rhs.comparisons;
        self.not_inserted += rhs.not_inserted;
    }
}

impl Add for InsertStats {
    type Output = InsertStats;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

#[derive(Debug, Clone)]
enum Placement {
    Linear(LinearProbe),
    Quadratic(QuadraticProbe),
    Chaining,
    Custom(CustomHash),
}

/// Builder for [`HashTable`].
///
/// # Examples
///
/// ```
/// use labhash::table::HashTable;
/// use labhash::table::Strategy;
///
/// let table = HashTable::builder()
///     .divisor(7)
///     .bucket_size(2)
///     .strategy(Strategy::Quadratic)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.total_slots(), 14);
/// ```
#[derive(Debug, Clone)]
pub struct HashTableBuilder {
    divisor: u64,
    bucket_size: usize,
    strategy: Strategy,
    linear: LinearProbe,
    quadratic: QuadraticProbe,
    custom_hash: Option<CustomHash>,
    max_key: u64,
}

impl Default for HashTableBuilder {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            bucket_size: DEFAULT_BUCKET_SIZE,
            strategy: Strategy::Linear,
            linear: LinearProbe::default(),
            quadratic: QuadraticProbe::default(),
            custom_hash: None,
            max_key: DEFAULT_MAX_KEY,
        }
    }
}

impl HashTableBuilder {
    /// Sets the divisor for division hashing. Zero is rejected by [`build`](Self::build).
    pub fn divisor(mut self, divisor: u64) -> Self {
        self.divisor = divisor;
        self
    }

    /// Sets the slot multiplier: the table has `bucket_size * divisor` slots.
    pub fn bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Sets the collision resolution strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the step of linear probing.
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0.
    pub fn linear_step(mut self, step: usize) -> Self {
        self.linear = LinearProbe::new(step);
        self
    }

    /// Sets the constants of quadratic probing.
    ///
    /// # Panics
    ///
    /// Panics if either constant is negative or not finite.
    pub fn quadratic_constants(mut self, c1: f64, c2: f64) -> Self {
        self.quadratic = QuadraticProbe::new(c1, c2);
        self
    }

    /// Sets the hash used by [`Strategy::Custom`].
    pub fn custom_hash(mut self, custom_hash: CustomHash) -> Self {
        self.custom_hash = Some(custom_hash);
        self
    }

    /// Sets the largest key `insert` accepts.
    pub fn max_key(mut self, max_key: u64) -> Self {
        self.max_key = max_key;
        self
    }

    /// Builds an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if the divisor or bucket size is zero, the slot count
    /// exceeds [`MAX_TOTAL_SLOTS`], or the custom strategy has no custom hash.
    pub fn build(self) -> Result<HashTable, Error> {
        let division = DivisionHash::new(self.divisor)?;
        if self.bucket_size == 0 {
            return Err(Error::config_invalid("bucket size cannot be zero"));
        }

        let total_slots = usize::try_from(self.divisor)
            .ok()
            .and_then(|divisor| divisor.checked_mul(self.bucket_size))
            .filter(|total| *total <= MAX_TOTAL_SLOTS)
            .ok_or_else(|| {
                Error::config_invalid("too many slots")
                    .with_context("divisor", self.divisor)
                    .with_context("bucket_size", self.bucket_size)
                    .with_context("max_total_slots", MAX_TOTAL_SLOTS)
            })?;

        let placement = match self.strategy {
            Strategy::Linear => Placement::Linear(self.linear),
            Strategy::Quadratic => Placement::Quadratic(self.quadratic),
            Strategy::Chaining => Placement::Chaining,
            Strategy::Custom => match self.custom_hash {
                Some(custom_hash) => Placement::Custom(custom_hash),
                None => {
                    return Err(Error::config_invalid(
                        "custom strategy requires a custom hash function",
                    ));
                }
            },
        };

        Ok(HashTable {
            division,
            bucket_size: self.bucket_size,
            total_slots,
            max_key: self.max_key,
            placement,
            slots: vec![Slot::Empty; total_slots],
            len: 0,
        })
    }
}

/// A fixed-capacity hash table of integer keys.
///
/// The slot count is `bucket_size * divisor` and never changes. Keys are only ever added;
/// there is no removal.
#[derive(Debug, Clone)]
pub struct HashTable {
    division: DivisionHash,
    bucket_size: usize,
    total_slots: usize,
    max_key: u64,
    placement: Placement,
    slots: Vec<Slot>,
    // Number of keys currently stored.
    len: usize,
}

impl HashTable {
    /// Returns a builder with default settings.
    pub fn builder() -> HashTableBuilder {
        HashTableBuilder::default()
    }

    /// Inserts `key` and reports what happened.
    ///
    /// - Linear / quadratic: the key goes to the first empty slot of the probe sequence.
    /// - Chaining: the key is appended to the list of its home slot.
    /// - Custom: the key goes to `custom_hash(key) mod total_slots`. If that slot is taken the
    ///   collision is counted and the previous key is overwritten.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::KeyOutOfRange`] if `key` exceeds the configured maximum.
    /// - [`ErrorKind::CapacityExceeded`] if a probe sequence finds no empty slot.
    ///
    /// The table is unchanged when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use labhash::table::HashTable;
    ///
    /// let mut table = HashTable::builder().divisor(5).build().unwrap();
    /// table.insert(5).unwrap();
    /// table.insert(10).unwrap();
    /// assert_eq!(table.get(1).unwrap().keys().collect::<Vec<_>>(), vec![10]);
    /// ```
    pub fn insert(&mut self, key: u64) -> Result<InsertStats, Error> {
        if key > self.max_key {
            return Err(Error::new(ErrorKind::KeyOutOfRange, "key exceeds the maximum")
                .with_context("key", key)
                .with_context("max_key", self.max_key));
        }

        let mut stats = InsertStats::default();
        let index = match &self.placement {
            Placement::Chaining => {
                self.chain_insert(key);
                return Ok(stats);
            }
            Placement::Custom(custom_hash) => {
                (custom_hash.hash_key(key) % self.total_slots as u64) as usize
            }
            Placement::Linear(probe) => self.probe(probe, key)?,
            Placement::Quadratic(probe) => self.probe(probe, key)?,
        };

        if self.slots[index].is_empty() {
            self.len += 1;
        } else {
            stats.collisions += 1;
        }
        self.slots[index] = Slot::Occupied(key);
        Ok(stats)
    }

    fn probe<P: ProbeSequence>(&self, probe: &P, key: u64) -> Result<usize, Error> {
        let home = self.division.index(key);
        find_empty(probe, home, self.total_slots, |index| {
            !self.slots[index].is_empty()
        })
        .map_err(|err| err.with_context("key", key))
    }

    fn chain_insert(&mut self, key: u64) {
        let slot = &mut self.slots[self.division.index(key)];
        match slot {
            Slot::Chain(chain) => chain.push_back(key),
            _ => *slot = Slot::Chain(Chain::new(key)),
        }
        self.len += 1;
    }

    /// Returns the home slot of `key` under division hashing.
    pub fn division_hash(&self, key: u64) -> usize {
        self.division.index(key)
    }

    /// Renders the table as rows of [`render::SLOTS_PER_ROW`] bracketed cells.
    ///
    /// See [`render::render_slots`] for the layout.
    pub fn render(&self) -> String {
        render::render_slots(&self.slots, render::SLOTS_PER_ROW)
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed slot count.
    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    /// Returns the division hash divisor.
    pub fn divisor(&self) -> u64 {
        self.division.divisor()
    }

    /// Returns the slot multiplier.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Returns the largest key accepted by `insert`.
    pub fn max_key(&self) -> u64 {
        self.max_key
    }

    /// Returns the configured strategy.
    pub fn strategy(&self) -> Strategy {
        match self.placement {
            Placement::Linear(_) => Strategy::Linear,
            Placement::Quadratic(_) => Strategy::Quadratic,
            Placement::Chaining => Strategy::Chaining,
            Placement::Custom(_) => Strategy::Custom,
        }
    }

    /// Returns the slots in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the slot at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Iterates stored keys in slot order, chains head to tail.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots.iter().flat_map(Slot::keys)
    }

    /// The reported load factor: slot array length over `total_slots`.
    ///
    /// This is always 1.0; it does not count stored keys.
    pub fn load_factor(&self) -> f64 {
        self.slots.len() as f64 / self.total_slots as f64
    }
}

/// Compact listing: `None` for empty slots, chains joined by `->`, slots joined by `", "`.
impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Slot::Empty => f.write_str("None")?,
                Slot::Occupied(key) => write!(f, "{key}")?,
                Slot::Chain(chain) => {
                    for (j, key) in chain.iter().enumerate() {
                        if j > 0 {
                            f.write_str("->")?;
                        }
                        write!(f, "{key}")?;
                    }
                }
            }
        }
        Ok(())
    }
}
