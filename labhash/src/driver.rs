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

//! Loads key records into one table per scheme and produces a report for each.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::error::Error;
use crate::hash::CustomHash;
use crate::input::KeyRecord;
use crate::report::Report;
use crate::table::DEFAULT_BUCKET_SIZE;
use crate::table::DEFAULT_DIVISOR;
use crate::table::DEFAULT_MAX_KEY;
use crate::table::HashTable;
use crate::table::InsertStats;
use crate::table::Strategy;

/// Which schemes a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProbingType {
    Linear,
    Quadratic,
    Chaining,
    Custom,
    /// Linear, quadratic and chaining, each on its own table.
    #[default]
    All,
}

impl ProbingType {
    /// The strategies run for this probing type, in report order.
    pub fn strategies(self) -> &'static [Strategy] {
        match self {
            ProbingType::Linear => &[Strategy::Linear],
            ProbingType::Quadratic => &[Strategy::Quadratic],
            ProbingType::Chaining => &[Strategy::Chaining],
            ProbingType::Custom => &[Strategy::Custom],
            ProbingType::All => &[Strategy::Linear, Strategy::Quadratic, Strategy::Chaining],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ProbingType::Linear => "linear",
            ProbingType::Quadratic => "quadratic",
            ProbingType::Chaining => "chaining",
            ProbingType::Custom => "custom",
            ProbingType::All => "all",
        }
    }
}

impl fmt::Display for ProbingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by every table of a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub bucket_size: usize,
    pub divisor: u64,
    pub probing: ProbingType,
    /// Required when the run includes [`Strategy::Custom`].
    pub custom_hash: Option<CustomHash>,
    pub max_key: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            divisor: DEFAULT_DIVISOR,
            probing: ProbingType::default(),
            custom_hash: None,
            max_key: DEFAULT_MAX_KEY,
        }
    }
}

impl RunConfig {
    /// Builds an empty table for `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) as
    /// [`HashTableBuilder::build`](crate::table::HashTableBuilder::build) does.
    pub fn build_table(&self, strategy: Strategy) -> Result<HashTable, Error> {
        let mut builder = HashTable::builder()
            .divisor(self.divisor)
            .bucket_size(self.bucket_size)
            .strategy(strategy)
            .max_key(self.max_key);
        if let Some(custom_hash) = &self.custom_hash {
            builder = builder.custom_hash(custom_hash.clone());
        }
        builder.build()
    }
}

/// The result of one scheme in a run.
#[derive(Debug)]
pub struct SchemeOutcome {
    pub strategy: Strategy,
    pub result: Result<Report, Error>,
}

/// Loads `records` into a fresh table for `strategy`.
///
/// Keys that cannot be stored (out of range, unparsable, no free slot) are counted as not
/// inserted and kept on the report; the load carries on with the next key.
///
/// # Errors
///
/// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if `records`
/// is empty or the table cannot be built. Nothing is loaded in that case.
pub fn load(
    config: &RunConfig,
    strategy: Strategy,
    records: &[KeyRecord],
) -> Result<Report, Error> {
    if records.is_empty() {
        return Err(Error::config_invalid("input is empty").with_context("strategy", strategy));
    }
    let mut table = config
        .build_table(strategy)
        .map_err(|err| err.with_context("strategy", strategy))?;

    let mut stats = InsertStats::default();
    let mut rejections = vec![];
    let start = Instant::now();
    for record in records {
        let inserted = match record {
            Ok(key) => table.insert(*key),
            Err(err) => Err(err.detached()),
        };
        match inserted {
            Ok(inserted) => stats += inserted,
            Err(err) if err.kind().is_per_key() => {
                stats.not_inserted += 1;
                rejections.push(err);
            }
            Err(err) => return Err(err.with_context("strategy", strategy)),
        }
    }
    let elapsed = start.elapsed();

    Ok(Report::new(&table, stats, elapsed, rejections))
}

/// Runs every scheme of `config.probing` on its own table.
///
/// A failing scheme does not stop the others.
pub fn run_schemes(config: &RunConfig, records: &[KeyRecord]) -> Vec<SchemeOutcome> {
    config
        .probing
        .strategies()
        .iter()
        .map(|&strategy| SchemeOutcome {
            strategy,
            result: load(config, strategy, records),
        })
        .collect()
}

/// Report path for `strategy`: `<base>_<strategy>.txt`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
///
/// use labhash::driver::output_path;
/// use labhash::table::Strategy;
///
/// assert_eq!(
///     output_path("out/LabHashingOutput", Strategy::Chaining),
///     PathBuf::from("out/LabHashingOutput_chaining.txt")
/// );
/// ```
pub fn output_path(base: impl AsRef<Path>, strategy: Strategy) -> PathBuf {
    let mut name = base.as_ref().as_os_str().to_owned();
    name.push(format!("_{strategy}.txt"));
    PathBuf::from(name)
}
