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

//! Fixed-capacity hash tables over integer keys, with collision statistics and text reports.
//!
//! A [`HashTable`](table::HashTable) has `bucket_size * divisor` slots, fixed at construction.
//! Keys are placed by one of four strategies:
//!
//! - linear probing from the division-hash home slot,
//! - quadratic probing from the division-hash home slot,
//! - separate chaining on the division-hash home slot,
//! - direct placement by a custom hash, overwriting on collision.
//!
//! # Usage
//!
//! ```rust
//! use labhash::table::HashTable;
//! use labhash::table::Strategy;
//!
//! let mut table = HashTable::builder()
//!     .divisor(3)
//!     .strategy(Strategy::Chaining)
//!     .build()
//!     .unwrap();
//! for key in [1, 4, 7] {
//!     table.insert(key).unwrap();
//! }
//! assert_eq!(table.render(), "[ ] [1 -> 4 -> 7] [ ]\n");
//! ```
//!
//! The [`driver`] module loads a file of keys into one table per scheme and builds a
//! [`Report`](report::Report) for each.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod driver;
pub mod error;
pub mod hash;
pub mod input;
pub mod probe;
pub mod render;
pub mod report;
pub mod slot;
pub mod table;
