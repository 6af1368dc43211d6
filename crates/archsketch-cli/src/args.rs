//! Command-line argument definitions for the archsketch CLI.
//!
//! Every argument is optional: running with none renders the diagram to
//! [`DEFAULT_OUTPUT_PATH`] with the default configuration.

use clap::Parser;

use archsketch::DEFAULT_OUTPUT_PATH;

/// Command-line arguments for the deployment diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output file (`.svg` writes vector output, anything else PNG)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["archsketch"]);
        assert_eq!(args.output, DEFAULT_OUTPUT_PATH);
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_explicit_flags() {
        let args = Args::parse_from([
            "archsketch",
            "-o",
            "diagram.svg",
            "--config",
            "archsketch.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output, "diagram.svg");
        assert_eq!(args.config.as_deref(), Some("archsketch.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Args::try_parse_from(["archsketch", "input.txt"]).is_err());
    }
}
