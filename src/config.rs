//! Command-line and environment configuration.
//!
//! Every option can come from a flag or an environment variable; a `.env`
//! file in the working directory is loaded first (see `main`).

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::record::MalformedPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// `{id, name, description}` rows.
    Data,
    /// Historical events with categories and language.
    Historical,
}

#[derive(Debug, Parser)]
#[command(name = "consult-tui", version, about)]
pub struct Config {
    /// Parse Server base URL, including the mount path.
    #[arg(
        long,
        env = "PARSE_SERVER_URL",
        default_value = "https://examenes.meeplab.com/parse"
    )]
    pub server_url: String,

    #[arg(long, env = "PARSE_APPLICATION_ID")]
    pub application_id: String,

    #[arg(long, env = "PARSE_CLIENT_KEY", hide_env_values = true)]
    pub client_key: String,

    /// Which record listing to show.
    #[arg(long, value_enum, default_value_t = Variant::Historical)]
    pub variant: Variant,

    /// Cloud function to call instead of the variant's default.
    #[arg(long, env = "PARSE_FUNCTION")]
    pub function: Option<String>,

    /// How long a toast stays visible, in milliseconds.
    #[arg(long, default_value_t = 3_000)]
    pub toast_ms: u64,

    /// Fail the whole fetch on any malformed record instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Where log output goes (the terminal is owned by the UI).
    #[arg(long, env = "CONSULT_LOG_FILE", default_value = "consult-tui.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn toast_delay(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn malformed_policy(&self) -> MalformedPolicy {
        if self.strict {
            MalformedPolicy::Reject
        } else {
            MalformedPolicy::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["consult-tui", "--application-id", "app", "--client-key", "key"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]);
        assert_eq!(cfg.variant, Variant::Historical);
        assert_eq!(cfg.toast_delay(), Duration::from_secs(3));
        assert_eq!(cfg.malformed_policy(), MalformedPolicy::Skip);
    }

    #[test]
    fn strict_selects_reject_policy() {
        assert_eq!(parse(&["--strict"]).malformed_policy(), MalformedPolicy::Reject);
    }

    #[test]
    fn variant_and_toast_delay_flags() {
        let cfg = parse(&["--variant", "data", "--toast-ms", "500"]);
        assert_eq!(cfg.variant, Variant::Data);
        assert_eq!(cfg.toast_delay(), Duration::from_millis(500));
    }

    #[test]
    fn definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
