use std::env;

use log::debug;
use rndstring_core::{entropy, generator_names, join, new_generator};

const DEFAULT_LENGTH: usize = 16;

const USAGE: &str = "\
usage: rndstring [OPTIONS] SPEC...

  SPEC                     generator name, optionally with a length: `name` or `name:length`
  -l, --list               list the available generators
  -d, --delimiter DELIM    delimiter between the parts of one token (default `-`)
  -n, --count N            number of tokens to print (default 1)
      --bytes N            print N bytes from the OS random source as hex
  -h, --help               show this help
  --                       treat every later argument as a SPEC, even one starting with `-`

examples:
  rndstring letters&digits:24
  rndstring -n 5 lcase:4 digits:4 lcase:4";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Options {
    list: bool,
    help: bool,
    delimiter: String,
    count: usize,
    bytes: Option<usize>,
    specs: Vec<(String, usize)>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            list: false,
            help: false,
            delimiter: "-".to_owned(),
            count: 1,
            bytes: None,
            specs: Vec::new(),
        }
    }
}

/// Parses `name` or `name:length`. A negative length counts as 0.
fn parse_spec(spec: &str) -> Result<(String, usize), String> {
    let (name, length) = match spec.rsplit_once(':') {
        Some((name, length)) => {
            let length: i64 = length
                .parse()
                .map_err(|_| format!("invalid length in {spec:?}"))?;
            (name, usize::try_from(length).unwrap_or(0))
        }
        None => (spec, DEFAULT_LENGTH),
    };

    if name.is_empty() {
        return Err(format!("missing generator name in {spec:?}"));
    }
    Ok((name.to_owned(), length))
}

fn parse_count(value: Option<String>, flag: &str) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag} expects a non-negative number, got {value:?}"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-l" | "--list" => options.list = true,
            "-h" | "--help" => options.help = true,
            "-d" | "--delimiter" => {
                options.delimiter = args.next().ok_or_else(|| format!("{arg} needs a value"))?;
            }
            "-n" | "--count" => options.count = parse_count(args.next(), &arg)?,
            "--bytes" => options.bytes = Some(parse_count(args.next(), &arg)?),
            "--" => {
                for spec in &mut args {
                    options.specs.push(parse_spec(&spec)?);
                }
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!(
                    "unknown option {flag} (put `--` before a SPEC that starts with `-`)"
                ));
            }
            spec => options.specs.push(parse_spec(spec)?),
        }
    }

    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = parse_args(env::args().skip(1))?;
    debug!("{options:?}");

    if options.help || (!options.list && options.bytes.is_none() && options.specs.is_empty()) {
        println!("{USAGE}");
        return Ok(());
    }

    if options.list {
        for name in generator_names() {
            println!("{name}");
        }
    }

    // Strict: printing degraded bytes here would be misleading
    if let Some(length) = options.bytes {
        let mut buf = vec![0u8; length];
        entropy::fill_random_bytes_strict(&mut buf)?;
        println!("{}", hex::encode(buf));
    }

    if !options.specs.is_empty() {
        let generators = options
            .specs
            .iter()
            .map(|(name, length)| new_generator(name, *length))
            .collect::<Result<Vec<_>, _>>()?;

        for _ in 0..options.count {
            println!("{}", join(&options.delimiter, &generators));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn specs_with_and_without_length() {
        let options = parse_args(args(&["lcase:4", "digits", "letters&digits:0"])).unwrap();
        assert_eq!(
            options.specs,
            vec![
                ("lcase".to_owned(), 4),
                ("digits".to_owned(), DEFAULT_LENGTH),
                ("letters&digits".to_owned(), 0),
            ]
        );
    }

    #[test]
    fn negative_length_is_zero() {
        assert_eq!(parse_spec("hex:-3"), Ok(("hex".to_owned(), 0)));
    }

    #[test]
    fn options_are_read() {
        let options = parse_args(args(&["-n", "3", "-d", "_", "--bytes", "8", "-l", "dummy:2"])).unwrap();
        assert_eq!(options.count, 3);
        assert_eq!(options.delimiter, "_");
        assert_eq!(options.bytes, Some(8));
        assert!(options.list);
        assert_eq!(options.specs, vec![("dummy".to_owned(), 2)]);
    }

    #[test]
    fn bad_arguments() {
        assert!(parse_args(args(&["--frobnicate"])).is_err());
        assert!(parse_args(args(&["-n"])).is_err());
        assert!(parse_args(args(&["-n", "many"])).is_err());
        assert!(parse_args(args(&["hex:abc"])).is_err());
        assert!(parse_args(args(&[":4"])).is_err());
    }

    #[test]
    fn double_dash_ends_options() {
        let options = parse_args(args(&["-n", "2", "--", "-x:3", "--list", "dummy:1"])).unwrap();
        assert_eq!(options.count, 2);
        assert!(!options.list);
        assert_eq!(
            options.specs,
            vec![
                ("-x".to_owned(), 3),
                ("--list".to_owned(), DEFAULT_LENGTH),
                ("dummy".to_owned(), 1),
            ]
        );

        let options = parse_args(args(&["--"])).unwrap();
        assert!(options.specs.is_empty());
    }

    #[test]
    fn unknown_option_mentions_double_dash() {
        let err = parse_args(args(&["-x:3"])).unwrap_err();
        assert!(err.contains("unknown option -x:3"));
        assert!(err.contains("`--`"));
    }

    #[test]
    fn dummy_specs_join() {
        let options = parse_args(args(&["dummy:4", "dummy:3"])).unwrap();
        let generators: Vec<_> = options
            .specs
            .iter()
            .map(|(name, length)| new_generator(name, *length).unwrap())
            .collect();
        assert_eq!(join(&options.delimiter, &generators), "AAAA-AAA");
    }
}
