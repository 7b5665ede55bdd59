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

//! Interactive completion of the command line arguments.
//!
//! Every question shows its default; an empty answer (or end of input) keeps it.

use std::io::BufRead;
use std::io::Write;

use anyhow::Context;
use anyhow::anyhow;
use clap::ValueEnum;

use crate::Args;
use crate::Probing;

/// Asks for input file, output base name, divisor and probing type, updating `args`.
pub(crate) fn complete<R, W>(args: &mut Args, input: &mut R, output: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let answer = ask(
        input,
        output,
        "Enter the name of the input file",
        &args.input.display().to_string(),
    )?;
    args.input = answer.into();

    let answer = ask(
        input,
        output,
        "Enter the base name of the output file",
        &args.output.display().to_string(),
    )?;
    args.output = answer.into();

    let answer = ask(input, output, "Enter the divisor", &args.divisor.to_string())?;
    args.divisor = answer
        .parse()
        .with_context(|| format!("please enter a valid integer for the divisor, got {answer:?}"))?;

    let default = args
        .probing
        .to_possible_value()
        .map(|value| value.get_name().to_string())
        .unwrap_or_default();
    let answer = ask(
        input,
        output,
        "Enter the probing type (linear, quadratic, chaining, custom) or 'all' to run all schemes",
        &default,
    )?;
    args.probing = Probing::from_str(&answer, true).map_err(|err| anyhow!(err))?;

    Ok(())
}

fn ask<R, W>(input: &mut R, output: &mut W, question: &str, default: &str) -> anyhow::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{question} (default: {default}): ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn defaults() -> Args {
        Args::try_parse_from(["labhash"]).unwrap()
    }

    #[test]
    fn test_empty_answers_keep_defaults() {
        let mut args = defaults();
        let mut output = vec![];
        complete(&mut args, &mut Cursor::new("\n\n\n\n"), &mut output).unwrap();

        assert_eq!(args.input, PathBuf::from("LabHashingInput.txt"));
        assert_eq!(args.output, PathBuf::from("LabHashingOutput"));
        assert_eq!(args.divisor, 113);
        assert_eq!(args.probing, Probing::All);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Enter the divisor (default: 113): "));
    }

    #[test]
    fn test_answers_override() {
        let mut args = defaults();
        let answers = "keys.txt\nout/report\n 41 \nQuadratic\n";
        complete(&mut args, &mut Cursor::new(answers), &mut std::io::sink()).unwrap();

        assert_eq!(args.input, PathBuf::from("keys.txt"));
        assert_eq!(args.output, PathBuf::from("out/report"));
        assert_eq!(args.divisor, 41);
        assert_eq!(args.probing, Probing::Quadratic);
    }

    #[test]
    fn test_end_of_input_keeps_defaults() {
        let mut args = defaults();
        complete(&mut args, &mut Cursor::new(""), &mut std::io::sink()).unwrap();
        assert_eq!(args.divisor, 113);
    }

    #[test]
    fn test_bad_divisor() {
        let mut args = defaults();
        let input = &mut Cursor::new("\n\nabc\n");
        let err = complete(&mut args, input, &mut std::io::sink()).unwrap_err();
        assert!(format!("{err:#}").contains("valid integer for the divisor"));
    }

    #[test]
    fn test_bad_probing() {
        let mut args = defaults();
        let input = &mut Cursor::new("\n\n\ncuckoo\n");
        let result = complete(&mut args, input, &mut std::io::sink());
        assert!(result.is_err());
    }
}
