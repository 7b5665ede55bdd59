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

//! Fixed-width rendering of table slots.
//!
//! Each slot becomes a bracketed cell and cells are laid out [`SLOTS_PER_ROW`] to a line:
//!
//! ```text
//! [ 5] [10] [  ] [ 3] [  ]
//! ```
//!
//! Every key is right-aligned to the width of the widest key in the table, an empty slot is a
//! blank cell of the same width, and a chain lists its keys separated by [`CHAIN_SEPARATOR`].

use crate::slot::Slot;

/// Cells per rendered line
pub const SLOTS_PER_ROW: usize = 5;

/// Separator between the keys of a chain
pub const CHAIN_SEPARATOR: &str = " -> ";

/// Renders `slots` as lines of `per_row` cells, each line ending with `\n`.
///
/// # Panics
///
/// Panics if `per_row` is 0.
pub fn render_slots(slots: &[Slot], per_row: usize) -> String {
    assert!(per_row > 0, "per_row must be at least 1");

    let width = key_width(slots);
    let mut out = String::new();
    for row in slots.chunks(per_row) {
        let cells = row
            .iter()
            .map(|slot| render_cell(slot, width))
            .collect::<Vec<_>>();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Widest printed key over every slot and chain node; 0 if the table holds no keys.
pub fn key_width(slots: &[Slot]) -> usize {
    slots
        .iter()
        .flat_map(Slot::keys)
        .map(decimal_width)
        .max()
        .unwrap_or(0)
}

fn render_cell(slot: &Slot, width: usize) -> String {
    match slot {
        Slot::Empty => format!("[{}]", " ".repeat(width)),
        Slot::Occupied(key) => format!("[{key:>width$}]"),
        Slot::Chain(chain) => {
            let keys = chain
                .iter()
                .map(|key| format!("{key:>width$}"))
                .collect::<Vec<_>>();
            format!("[{}]", keys.join(CHAIN_SEPARATOR))
        }
    }
}

fn decimal_width(key: u64) -> usize {
    key.checked_ilog10().map_or(1, |log| log as usize + 1)
}
