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

//! Reading keys from text, one per line.
//!
//! A line is trimmed; if what remains is a non-empty run of ASCII digits it is a key.
//! Anything else (blank lines, signs, letters, decimals) is skipped without error. A digit run
//! too long for `u64` is reported as [`ErrorKind::InvalidKey`] so the caller can count it.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;
use crate::error::ErrorKind;

/// One key read from the input, or the reason it could not be used.
pub type KeyRecord = Result<u64, Error>;

/// Parses a single line. `None` means the line carries no key.
pub fn parse_line(line: &str) -> Option<KeyRecord> {
    let line = line.trim();
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(line.parse::<u64>().map_err(|err| {
        Error::new(ErrorKind::InvalidKey, "key is not a valid integer")
            .with_context("key", line)
            .set_source(err)
    }))
}

/// Reads every key record from `reader`, tagging invalid ones with their 1-based line number.
///
/// # Errors
///
/// Returns [`ErrorKind::Unexpected`] if reading fails.
pub fn read_keys<R: BufRead>(reader: R) -> Result<Vec<KeyRecord>, Error> {
    let mut records = vec![];
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            Error::unexpected("failed to read input", err).with_context("line", lineno + 1)
        })?;
        if let Some(record) = parse_line(&line) {
            records.push(record.map_err(|err| err.with_context("line", lineno + 1)));
        }
    }
    Ok(records)
}

/// Opens `path` and reads its key records, see [`read_keys`].
///
/// # Errors
///
/// Returns [`ErrorKind::Unexpected`] if the file cannot be opened or read.
pub fn read_keys_from_path(path: impl AsRef<Path>) -> Result<Vec<KeyRecord>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        Error::unexpected("failed to open input file", err).with_context("path", path.display())
    })?;
    read_keys(BufReader::new(file)).map_err(|err| err.with_context("path", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("42").unwrap().unwrap(), 42);
        assert_eq!(parse_line("  007 \r").unwrap().unwrap(), 7);
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("-5").is_none());
        assert!(parse_line("+5").is_none());
        assert!(parse_line("3.14").is_none());
        assert!(parse_line("12 34").is_none());
        assert!(parse_line("abc").is_none());
    }

    #[test]
    fn test_parse_line_overflow() {
        let err = parse_line("99999999999999999999999").unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        assert_eq!(err.context("key"), Some("99999999999999999999999"));
    }

    #[test]
    fn test_read_keys() {
        let input = "5\n\nten\n10\n-1\n18446744073709551616\n3\n";
        let records = read_keys(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(*records[0].as_ref().unwrap(), 5);
        assert_eq!(*records[1].as_ref().unwrap(), 10);
        let err = records[2].as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        assert_eq!(err.context("line"), Some("6"));
        assert_eq!(*records[3].as_ref().unwrap(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = read_keys_from_path("/nonexistent/labhash/input.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(std::error::Error::source(&err).is_some());
    }
}
