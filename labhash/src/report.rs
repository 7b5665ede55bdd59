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
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Error;
use crate::table::HashTable;
use crate::table::InsertStats;
use crate::table::Strategy;

const RULE: &str = "=========================";

/// The outcome of loading one table: counters, timing and the rendered slots.
///
/// `Display` produces the report text written to disk.
#[derive(Debug)]
pub struct Report {
    strategy: Strategy,
    elapsed: Duration,
    total_slots: usize,
    bucket_size: usize,
    stored: usize,
    stats: InsertStats,
    load_factor: f64,
    rendered: String,
    rejections: Vec<Error>,
}

impl Report {
    /// Snapshots `table` after a load.
    ///
    /// `stats` are the summed counters of the load, and `rejections` the errors of keys that
    /// were not inserted.
    pub fn new(
        table: &HashTable,
        stats: InsertStats,
        elapsed: Duration,
        rejections: Vec<Error>,
    ) -> Self {
        Self {
            strategy: table.strategy(),
            elapsed,
            total_slots: table.total_slots(),
            bucket_size: table.bucket_size(),
            stored: table.len(),
            stats,
            load_factor: table.load_factor(),
            rendered: table.render(),
            rejections,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Keys held by the table when the report was taken.
    pub fn stored(&self) -> usize {
        self.stored
    }

    pub fn stats(&self) -> InsertStats {
        self.stats
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// The rendered slot rows.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Errors of the keys counted as not inserted, in input order.
    pub fn rejections(&self) -> &[Error] {
        &self.rejections
    }

    /// Writes the report text to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Unexpected`](crate::error::ErrorKind::Unexpected) if the file
    /// cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|err| {
            Error::unexpected("failed to write report", err).with_context("path", path.display())
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.elapsed.as_secs_f64() * 1000.0;
        writeln!(f, "Runtime: {millis:.7}ms")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Hash table size: {}", self.total_slots)?;
        writeln!(f, "Bucket Size: {}", self.bucket_size)?;
        writeln!(f, "Number of collisions: {}", self.stats.collisions)?;
        writeln!(f, "Number of comparisons: {}", self.stats.comparisons)?;
        writeln!(f, "Number of items not inserted: {}", self.stats.not_inserted)?;
        writeln!(f, "Load factor: {:.1}", self.load_factor)?;
        writeln!(f)?;
        writeln!(f, "Resulting hash table:")?;
        f.write_str(&self.rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_text() {
        let mut table = HashTable::builder().divisor(5).build().unwrap();
        let mut stats = InsertStats::default();
        for key in [5, 10, 3] {
            stats += table.insert(key).unwrap();
        }
        stats.not_inserted = 1;

        let report = Report::new(&table, stats, Duration::from_micros(1500), vec![]);
        assert_eq!(
            report.to_string(),
            "Runtime: 1.5000000ms\n\
             =========================\n\
             Hash table size: 5\n\
             Bucket Size: 1\n\
             Number of collisions: 0\n\
             Number of comparisons: 0\n\
             Number of items not inserted: 1\n\
             Load factor: 1.0\n\
             \n\
             Resulting hash table:\n\
             [ 5] [10] [  ] [ 3] [  ]\n"
        );
        assert_eq!(report.stored(), 3);
        assert_eq!(report.strategy(), Strategy::Linear);
    }
}
