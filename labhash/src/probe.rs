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

//! Probe sequences for open addressing.
//!
//! A probe sequence maps `(home, attempt)` to a candidate slot. [`find_empty`] walks a sequence
//! against the live table until it meets an empty slot, giving up after `total_slots`
//! candidates (the home slot included) with
//! [`ErrorKind::CapacityExceeded`](crate::error::ErrorKind::CapacityExceeded).

use crate::error::Error;
use crate::error::ErrorKind;

/// Default linear step.
pub const DEFAULT_LINEAR_STEP: usize = 1;

/// Default quadratic constants; together they give the triangular offsets `i * (i + 1) / 2`.
pub const DEFAULT_QUADRATIC_C1: f64 = 0.5;
pub const DEFAULT_QUADRATIC_C2: f64 = 0.5;

/// A deterministic probe sequence.
pub trait ProbeSequence {
    /// Returns the candidate for `attempt` (starting at 1), given the home slot and the
    /// previous candidate.
    fn next_index(&self, home: usize, previous: usize, attempt: usize, total_slots: usize)
    -> usize;
}

/// Linear probing: `index = (index + step) mod total_slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearProbe {
    step: usize,
}

impl LinearProbe {
    /// Creates a linear probe with the given step.
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0.
    pub fn new(step: usize) -> Self {
        assert!(step > 0, "linear probe step must be at least 1");
        Self { step }
    }
}

impl Default for LinearProbe {
    fn default() -> Self {
        Self::new(DEFAULT_LINEAR_STEP)
    }
}

impl ProbeSequence for LinearProbe {
    fn next_index(
        &self,
        _home: usize,
        previous: usize,
        _attempt: usize,
        total_slots: usize,
    ) -> usize {
        (previous + self.step % total_slots) % total_slots
    }
}

/// Quadratic probing: `index = (home + floor(c1 * i + c2 * i^2)) mod total_slots`.
///
/// With the default constants the sequence is not guaranteed to visit every slot, so a probe
/// can report a full table while empty slots remain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticProbe {
    c1: f64,
    c2: f64,
}

impl QuadraticProbe {
    /// Creates a quadratic probe.
    ///
    /// # Panics
    ///
    /// Panics if either constant is negative or not finite.
    pub fn new(c1: f64, c2: f64) -> Self {
        assert!(
            c1.is_finite() && c1 >= 0.0 && c2.is_finite() && c2 >= 0.0,
            "quadratic constants must be finite and non-negative, got c1={c1}, c2={c2}"
        );
        Self { c1, c2 }
    }

    fn offset(&self, attempt: usize) -> usize {
        let i = attempt as f64;
        // `as` saturates for values past usize::MAX.
        (self.c1 * i + self.c2 * i * i).floor() as usize
    }
}

impl Default for QuadraticProbe {
    fn default() -> Self {
        Self::new(DEFAULT_QUADRATIC_C1, DEFAULT_QUADRATIC_C2)
    }
}

impl ProbeSequence for QuadraticProbe {
    fn next_index(
        &self,
        home: usize,
        _previous: usize,
        attempt: usize,
        total_slots: usize,
    ) -> usize {
        (home + self.offset(attempt) % total_slots) % total_slots
    }
}

/// Walks `probe` from `home` and returns the first candidate for which `is_occupied` is false.
///
/// Occupancy is asked for every candidate; nothing is cached between attempts.
///
/// # Errors
///
/// Returns [`ErrorKind::CapacityExceeded`] if none of the first `total_slots` candidates is
/// empty.
pub fn find_empty<P, F>(
    probe: &P,
    home: usize,
    total_slots: usize,
    is_occupied: F,
) -> Result<usize, Error>
where
    P: ProbeSequence + ?Sized,
    F: Fn(usize) -> bool,
{
    debug_assert!(home < total_slots, "home {home} out of {total_slots} slots");

    let mut index = home;
    if !is_occupied(index) {
        return Ok(index);
    }
    for attempt in 1..total_slots {
        index = probe.next_index(home, index, attempt, total_slots);
        if !is_occupied(index) {
            return Ok(index);
        }
    }

    Err(Error::new(ErrorKind::CapacityExceeded, "hash table is full")
        .with_context("home", home)
        .with_context("attempts", total_slots))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence<P: ProbeSequence>(
        probe: &P,
        home: usize,
        total_slots: usize,
        n: usize,
    ) -> Vec<usize> {
        let mut out = vec![home];
        let mut index = home;
        for attempt in 1..n {
            index = probe.next_index(home, index, attempt, total_slots);
            out.push(index);
        }
        out
    }

    #[test]
    fn test_linear_sequence_wraps() {
        let probe = LinearProbe::default();
        assert_eq!(sequence(&probe, 3, 5, 5), vec![3, 4, 0, 1, 2]);

        let probe = LinearProbe::new(2);
        assert_eq!(sequence(&probe, 0, 5, 5), vec![0, 2, 4, 1, 3]);
    }

    #[test]
    fn test_quadratic_sequence_is_triangular() {
        let probe = QuadraticProbe::default();
        // offsets 1, 3, 6, 10, 15, 21
        assert_eq!(sequence(&probe, 0, 100, 7), vec![0, 1, 3, 6, 10, 15, 21]);
        assert_eq!(sequence(&probe, 2, 5, 4), vec![2, 3, 0, 3]);
    }

    #[test]
    fn test_find_empty_skips_occupied() {
        let occupied = [true, true, false, true, false];
        let index = find_empty(&LinearProbe::default(), 0, 5, |i| occupied[i]).unwrap();
        assert_eq!(index, 2);

        let index = find_empty(&LinearProbe::default(), 3, 5, |i| occupied[i]).unwrap();
        assert_eq!(index, 4);
    }

    #[test]
    fn test_find_empty_full_table() {
        let err = find_empty(&LinearProbe::default(), 1, 4, |_| true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(err.context("attempts"), Some("4"));
    }

    #[test]
    fn test_quadratic_can_miss_free_slots() {
        // From home 0 in 5 slots the candidates are 0, 1, 3, 1, 0; slot 2 is never tried.
        let occupied = |i: usize| i != 2;
        let err = find_empty(&QuadraticProbe::default(), 0, 5, occupied).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    }

    #[test]
    #[should_panic(expected = "linear probe step must be at least 1")]
    fn test_zero_step_panics() {
        let _ = LinearProbe::new(0);
    }
}
