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

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use labhash::driver::ProbingType;
use labhash::driver::RunConfig;
use labhash::driver::output_path;
use labhash::driver::run_schemes;
use labhash::hash::CustomHash;
use labhash::input::read_keys_from_path;
use labhash::table::DEFAULT_BUCKET_SIZE;
use labhash::table::DEFAULT_DIVISOR;

mod prompt;

const DEFAULT_INPUT: &str = "LabHashingInput.txt";
const DEFAULT_OUTPUT: &str = "LabHashingOutput";

#[derive(Parser, Debug)]
#[command(name = "labhash", version)]
#[command(about = "Load integer keys into fixed-size hash tables and report collision statistics")]
#[command(
    long_about = "Load integer keys into fixed-size hash tables and report collision statistics.\n\n\
Each scheme builds its own table of bucket_size * divisor slots and writes\n\
<output>_<scheme>.txt with the runtime, counters and the rendered table."
)]
struct Args {
    /// File of keys, one non-negative integer per line
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Base name of the report files
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Divisor of the division hash
    #[arg(short, long, default_value_t = DEFAULT_DIVISOR)]
    divisor: u64,

    /// Slot multiplier: tables have bucket_size * divisor slots
    #[arg(short, long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: usize,

    /// Collision scheme; `all` runs linear, quadratic and chaining
    #[arg(short, long, value_enum, default_value_t = Probing::All)]
    probing: Probing,

    /// Hash function of the custom scheme
    #[arg(long, value_enum, default_value_t = CustomHashKind::DigitSum)]
    custom_hash: CustomHashKind,

    /// Ask for input, output, divisor and probing type on the terminal
    #[arg(long)]
    interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Probing {
    Linear,
    Quadratic,
    Chaining,
    Custom,
    All,
}

impl From<Probing> for ProbingType {
    fn from(probing: Probing) -> Self {
        match probing {
            Probing::Linear => ProbingType::Linear,
            Probing::Quadratic => ProbingType::Quadratic,
            Probing::Chaining => ProbingType::Chaining,
            Probing::Custom => ProbingType::Custom,
            Probing::All => ProbingType::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CustomHashKind {
    /// Sum of the ASCII codes of the key's digits, modulo the divisor
    DigitSum,
    /// Middle two digits of the squared key
    MidSquare,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let custom_hash = match self.custom_hash {
            // A zero divisor is reported by every scheme when its table is built.
            CustomHashKind::DigitSum => CustomHash::digit_sum(self.divisor).ok(),
            CustomHashKind::MidSquare => Some(CustomHash::mid_square()),
        };
        RunConfig {
            bucket_size: self.bucket_size,
            divisor: self.divisor,
            probing: self.probing.into(),
            custom_hash,
            ..RunConfig::default()
        }
    }
}

/// Returns whether every scheme produced a report.
fn run(args: &Args) -> anyhow::Result<bool> {
    let records = read_keys_from_path(&args.input)
        .with_context(|| format!("cannot load keys from {}", args.input.display()))?;
    let config = args.run_config();

    let mut all_ok = true;
    for outcome in run_schemes(&config, &records) {
        let strategy = outcome.strategy;
        let written = outcome.result.and_then(|report| {
            for rejection in report.rejections() {
                eprintln!("warning: [{strategy}] key not inserted: {rejection}");
            }
            let path = output_path(&args.output, strategy);
            report.write_to(&path)?;
            Ok((report, path))
        });
        match written {
            Ok((report, path)) => println!(
                "[{strategy}] {} keys in {} slots, {} not inserted, {:.3}ms -> {}",
                report.stored(),
                report.total_slots(),
                report.stats().not_inserted,
                report.elapsed().as_secs_f64() * 1000.0,
                path.display()
            ),
            Err(err) => {
                eprintln!("error: [{strategy}] {err}");
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    let mut args = Args::parse();
    if args.interactive {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        if let Err(err) = prompt::complete(&mut args, &mut stdin.lock(), &mut stdout) {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["labhash"]).unwrap();
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(args.divisor, 113);
        assert_eq!(args.bucket_size, 1);
        assert_eq!(args.probing, Probing::All);
        assert_eq!(args.custom_hash, CustomHashKind::DigitSum);
        assert!(!args.interactive);

        let config = args.run_config();
        assert_eq!(config.probing, ProbingType::All);
        assert_eq!(config.custom_hash.unwrap().name(), "digit-sum");
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "labhash",
            "-i",
            "keys.txt",
            "--divisor",
            "41",
            "-b",
            "3",
            "--probing",
            "custom",
            "--custom-hash",
            "mid-square",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("keys.txt"));
        let config = args.run_config();
        assert_eq!(config.divisor, 41);
        assert_eq!(config.bucket_size, 3);
        assert_eq!(config.probing, ProbingType::Custom);
        assert_eq!(config.custom_hash.unwrap().name(), "mid-square");
    }

    #[test]
    fn test_zero_divisor_reaches_the_schemes() {
        let args = Args::try_parse_from(["labhash", "-d", "0"]).unwrap();
        let config = args.run_config();
        assert!(config.custom_hash.is_none());
        assert_eq!(config.divisor, 0);
    }

    #[test]
    fn test_unknown_probing_rejected() {
        assert!(Args::try_parse_from(["labhash", "-p", "cuckoo"]).is_err());
    }
}
