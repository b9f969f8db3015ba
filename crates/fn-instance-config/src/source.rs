//! Command-line flags that select where the instance config comes from.

use crate::ConfigError;
use crate::default_path::default_config_path;
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;

/// Long flags that may also be spelled with a single leading dash.
const SINGLE_DASH_FLAGS: &[&str] = &["help", "instance-conf-path", "instance-conf"];

/// Where the instance config comes from, as selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Print usage before resolving.
    pub help: bool,
    /// YAML config file path; empty means no file.
    pub path: String,
    /// Inline JSON config content; empty means none.
    pub content: String,
}

/// Locate and load the function instance config.
// `help` only prints usage; resolution still runs.
#[derive(Debug, Parser)]
#[command(name = "fn-instance", disable_help_flag = true)]
struct Flags {
    /// Print help information
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        hide_default_value = true,
        value_parser = parse_flag_bool
    )]
    help: bool,
    /// Path to the YAML instance config file
    #[arg(
        long = "instance-conf-path",
        value_name = "PATH",
        default_value = default_config_path(),
        allow_hyphen_values = true
    )]
    path: String,
    /// Inline JSON instance config content
    #[arg(
        long = "instance-conf",
        value_name = "JSON",
        default_value = "",
        allow_hyphen_values = true
    )]
    content: String,
}

impl From<Flags> for ConfigSource {
    fn from(flags: Flags) -> Self {
        Self {
            help: flags.help,
            path: flags.path,
            content: flags.content,
        }
    }
}

impl ConfigSource {
    /// Build a source from explicit values, bypassing flag parsing.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            help: false,
            path: path.into(),
            content: content.into(),
        }
    }

    /// Parse the process arguments, exiting with usage on malformed input.
    pub fn from_env() -> Self {
        Flags::parse_from(normalize_args(std::env::args_os())).into()
    }

    /// Parse an explicit argument list (first item is the program name).
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = normalize_args(args.into_iter().map(Into::into));
        Ok(Flags::try_parse_from(args)?.into())
    }

    /// Rendered usage text.
    pub fn usage() -> String {
        Flags::command().render_help().to_string()
    }
}

/// Boolean flag values in the spellings `-flag=value` has always accepted.
fn parse_flag_bool(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(format!("invalid boolean value {other:?}")),
    }
}

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value` for the
/// known long flags. Stops at `--`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut normalized = Vec::new();
    let mut passthrough = false;
    for (idx, arg) in args.into_iter().enumerate() {
        if idx == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        normalized.push(normalize_arg(arg));
    }
    normalized
}

fn normalize_arg(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if SINGLE_DASH_FLAGS.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_path::DEFAULT_CONFIG_RELATIVE_PATH;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_home_path_and_empty_content() {
        let source = ConfigSource::from_args(["fn-instance"]).expect("parse");
        assert!(!source.help);
        assert!(source.path.ends_with(DEFAULT_CONFIG_RELATIVE_PATH));
        assert_eq!(source.content, "");
    }

    #[test]
    fn accepts_single_dash_flags() {
        let source = ConfigSource::from_args([
            "fn-instance",
            "-help",
            "-instance-conf-path",
            "/etc/conf.yaml",
            "-instance-conf={\"tenant\":\"t1\"}",
        ])
        .expect("parse");
        assert_eq!(
            source,
            ConfigSource {
                help: true,
                path: "/etc/conf.yaml".to_string(),
                content: r#"{"tenant":"t1"}"#.to_string(),
            }
        );
    }

    #[test]
    fn accepts_double_dash_flags() {
        let source = ConfigSource::from_args([
            "fn-instance",
            "--instance-conf-path=/etc/conf.yaml",
            "--instance-conf",
            "{}",
        ])
        .expect("parse");
        assert_eq!(source.path, "/etc/conf.yaml");
        assert_eq!(source.content, "{}");
        assert!(!source.help);
    }

    #[test]
    fn explicit_empty_path_is_kept() {
        let source =
            ConfigSource::from_args(["fn-instance", "-instance-conf-path", ""]).expect("parse");
        assert_eq!(source.path, "");
    }

    #[test]
    fn unknown_flag_is_an_argument_error() {
        let err = ConfigSource::from_args(["fn-instance", "--bogus"]).unwrap_err();
        assert!(matches!(err, ConfigError::Arguments(_)));
    }

    #[test]
    fn help_takes_an_optional_boolean_value() {
        let parse = |flag: &str| {
            ConfigSource::from_args(["fn-instance", flag, "-instance-conf", "{}"]).map(|s| s.help)
        };
        assert!(parse("-help").expect("bare"));
        assert!(parse("-help=true").expect("true"));
        assert!(parse("--help=1").expect("one"));
        assert!(!parse("-help=false").expect("false"));
        assert!(!parse("-help=F").expect("F"));
        assert!(matches!(parse("-help=maybe"), Err(ConfigError::Arguments(_))));
    }

    #[test]
    fn help_does_not_swallow_the_next_flag() {
        let source =
            ConfigSource::from_args(["fn-instance", "-help", "-instance-conf-path", "/c.yaml"])
                .expect("parse");
        assert!(source.help);
        assert_eq!(source.path, "/c.yaml");
    }

    #[test]
    fn single_dash_equals_form_is_normalized() {
        let source = ConfigSource::from_args([
            OsString::from("fn-instance"),
            OsString::from("-instance-conf-path=/etc/conf.yaml"),
            OsString::from("-instance-conf"),
            OsString::from("{}"),
        ])
        .expect("parse");
        assert_eq!(source, ConfigSource::new("/etc/conf.yaml", "{}"));
    }

    #[test]
    fn usage_lists_flags() {
        let usage = ConfigSource::usage();
        assert!(usage.contains("--instance-conf-path"));
        assert!(usage.contains("--instance-conf"));
        assert!(usage.contains("--help"));
    }

    #[test]
    fn normalize_leaves_values_and_unknown_flags_alone() {
        let args = normalize_args(
            ["fn-instance", "-x", "-help", "--", "-help"]
                .into_iter()
                .map(OsString::from),
        );
        assert_eq!(
            args,
            vec![
                OsString::from("fn-instance"),
                OsString::from("-x"),
                OsString::from("--help"),
                OsString::from("--"),
                OsString::from("-help"),
            ]
        );
    }
}
