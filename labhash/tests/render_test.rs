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

use googletest::assert_that;
use googletest::prelude::contains_substring;
use labhash::render::CHAIN_SEPARATOR;
use labhash::render::SLOTS_PER_ROW;
use labhash::table::HashTable;
use labhash::table::Strategy;

/// Reads rendered rows back into per-slot key lists.
fn parse_rendered(text: &str) -> Vec<Vec<u64>> {
    let mut slots = vec![];
    for line in text.lines() {
        let mut rest = line;
        while let Some(open) = rest.find('[') {
            let close = rest[open..].find(']').unwrap() + open;
            let cell = &rest[open + 1..close];
            let keys = if cell.trim().is_empty() {
                vec![]
            } else {
                cell.split(CHAIN_SEPARATOR)
                    .map(|key| key.trim().parse::<u64>().unwrap())
                    .collect()
            };
            slots.push(keys);
            rest = &rest[close + 1..];
        }
    }
    slots
}

fn loaded(strategy: Strategy, divisor: u64, keys: &[u64]) -> HashTable {
    let mut table = HashTable::builder()
        .divisor(divisor)
        .strategy(strategy)
        .build()
        .unwrap();
    for key in keys {
        let _ = table.insert(*key);
    }
    table
}

#[test]
fn test_render_round_trip() {
    let keys = [7, 14, 3, 99_999, 21, 8, 0, 42, 1000];
    for strategy in [Strategy::Linear, Strategy::Quadratic, Strategy::Chaining] {
        let table = loaded(strategy, 7, &keys);
        let parsed = parse_rendered(&table.render());

        assert_eq!(parsed.len(), table.total_slots(), "{strategy}");
        for (index, slot) in table.slots().iter().enumerate() {
            assert_eq!(parsed[index], slot.keys().collect::<Vec<_>>(), "{strategy}");
        }
    }
}

#[test]
fn test_render_alignment() {
    let table = loaded(Strategy::Linear, 12, &[5, 10_000, 77]);
    let rendered = table.render();
    let lines = rendered.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 12usize.div_ceil(SLOTS_PER_ROW));
    // Keys and blanks alike are five characters wide between the brackets.
    let width = "10000".len() + 2;
    for line in &lines {
        for cell in line.split_inclusive(']') {
            assert_eq!(cell.trim_start().len(), width, "{line:?}");
        }
    }
    assert_eq!(lines[0].len(), lines[1].len());
    // 10000 mod 12 = 4, 5 lands on 5, 77 mod 12 = 5 is taken and probes to 6.
    assert_eq!(lines[0], "[     ] [     ] [     ] [     ] [10000]");
    assert_that!(lines[1], contains_substring("[    5] [   77]"));
    assert_eq!(lines[2], "[     ] [     ]");
}

#[test]
fn test_render_chain_separator() {
    let table = loaded(Strategy::Chaining, 2, &[1, 3, 5, 2]);
    assert_eq!(table.render(), "[2] [1 -> 3 -> 5]\n");
}
