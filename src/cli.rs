use clap::Parser;
use std::path::PathBuf;

use iq_confluence_bridge::config::DEFAULT_CONFIG_PATH;

/// Publish Sonatype IQ policy evaluation reports to Confluence
#[derive(Parser, Debug)]
#[command(name = "iq-confluence-bridge")]
#[command(version)]
#[command(
    about = "Receive Sonatype IQ webhooks and publish policy reports as Confluence pages",
    long_about = None
)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(long = "configfile", value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config_file: PathBuf,

    /// Log full request context (payloads, owner ids, rendered sizes)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parses the process arguments, leaving the exit decision to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["iq-confluence-bridge"]).unwrap();
        assert_eq!(args.config_file, PathBuf::from("config.yml"));
        assert!(!args.verbose);
    }

    #[test]
    fn test_configfile_and_verbose() {
        let args = Args::try_parse_from([
            "iq-confluence-bridge",
            "--configfile",
            "/etc/bridge.yml",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(args.config_file, PathBuf::from("/etc/bridge.yml"));
        assert!(args.verbose);
    }

    #[test]
    fn test_short_verbose() {
        let args = Args::try_parse_from(["iq-confluence-bridge", "-v"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = Args::try_parse_from(["iq-confluence-bridge", "--format", "json"]);
        assert!(result.is_err());
    }
}
