#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `KNOBMENU_DEMO_*` prefix.

use std::env;
use std::fmt;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
knobmenu demo: pulse-generator settings on a character LCD

USAGE:
    knobmenu-demo [OPTIONS]

OPTIONS:
    --rows=N         LCD rows (default: 4)
    --cols=N         LCD columns (default: 20)
    --ascii          Use ASCII markers only
    --script=KEYS    Replay KEYS instead of reading stdin
    --log-json       Emit logs as JSON lines on stderr
    --help, -h       Show this help message
    --version, -V    Show version

KEYS:
    > or r           Rotate right (next item)
    < or l           Rotate left (previous item)
    c                Click (enter submenu, use item)
    C or L           Long click (back to parent)
    q                Quit
    other            Ignored

ENVIRONMENT VARIABLES:
    KNOBMENU_DEMO_ROWS     Override --rows
    KNOBMENU_DEMO_COLS     Override --cols
    KNOBMENU_DEMO_SCRIPT   Override --script
    KNOBMENU_LOG           Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Number of LCD rows.
    pub rows: usize,
    /// Number of LCD columns.
    pub cols: usize,
    /// Restrict markers to ASCII.
    pub ascii: bool,
    /// Input symbols to replay; `None` reads stdin.
    pub script: Option<String>,
    /// JSON log output.
    pub log_json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 20,
            ascii: false,
            script: None,
            log_json: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A rejected argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    Unknown(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::Unknown(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version` or a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("knobmenu-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `var`.
    ///
    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags. Unparsable environment
    /// values are ignored.
    pub fn parse_from<I, F>(args: I, var: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = var("KNOBMENU_DEMO_ROWS")
            && let Ok(n) = val.parse()
        {
            opts.rows = n;
        }
        if let Some(val) = var("KNOBMENU_DEMO_COLS")
            && let Ok(n) = val.parse()
        {
            opts.cols = n;
        }
        if let Some(val) = var("KNOBMENU_DEMO_SCRIPT") {
            opts.script = Some(val);
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--ascii" => opts.ascii = true,
                "--log-json" => opts.log_json = true,
                other => {
                    if let Some(val) = other.strip_prefix("--rows=") {
                        opts.rows = parse_count("--rows", val)?;
                    } else if let Some(val) = other.strip_prefix("--cols=") {
                        opts.cols = parse_count("--cols", val)?;
                    } else if let Some(val) = other.strip_prefix("--script=") {
                        opts.script = Some(val.to_string());
                    } else {
                        return Err(CliError::Unknown(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}

fn parse_count(flag: &'static str, val: &str) -> Result<usize, CliError> {
    match val.parse() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError::InvalidValue {
            flag,
            value: val.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.rows, 4);
        assert_eq!(opts.cols, 20);
        assert!(!opts.ascii);
        assert_eq!(opts.script, None);
        assert!(!opts.log_json);
    }

    #[test]
    fn flags_are_parsed() {
        let cmd = Opts::parse_from(
            args(&["--rows=2", "--cols=16", "--ascii", "--script=rrc", "--log-json"]),
            no_env,
        );
        assert_eq!(
            cmd,
            Ok(Command::Run(Opts {
                rows: 2,
                cols: 16,
                ascii: true,
                script: Some("rrc".into()),
                log_json: true,
            }))
        );
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = |key: &str| match key {
            "KNOBMENU_DEMO_ROWS" => Some("2".to_string()),
            "KNOBMENU_DEMO_COLS" => Some("not a number".to_string()),
            "KNOBMENU_DEMO_SCRIPT" => Some("cc".to_string()),
            _ => None,
        };
        let Ok(Command::Run(opts)) = Opts::parse_from(args(&["--script=l"]), env) else {
            panic!("expected run");
        };
        assert_eq!(opts.rows, 2);
        assert_eq!(opts.cols, 20);
        assert_eq!(opts.script.as_deref(), Some("l"));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(Opts::parse_from(args(&["-h", "--bogus"]), no_env), Ok(Command::Help));
        assert_eq!(Opts::parse_from(args(&["--version"]), no_env), Ok(Command::Version));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert_eq!(
            Opts::parse_from(args(&["--rows=0"]), no_env),
            Err(CliError::InvalidValue {
                flag: "--rows",
                value: "0".into()
            })
        );
        let err = Opts::parse_from(args(&["--frobnicate"]), no_env).unwrap_err();
        assert_eq!(err.to_string(), "Unknown argument: --frobnicate");
    }

    #[test]
    fn help_text_lists_keys_and_env_vars() {
        assert!(HELP_TEXT.contains("Long click"));
        assert!(HELP_TEXT.contains("KNOBMENU_DEMO_SCRIPT"));
        assert!(HELP_TEXT.contains("KNOBMENU_LOG"));
        assert!(!VERSION.is_empty());
    }
}
