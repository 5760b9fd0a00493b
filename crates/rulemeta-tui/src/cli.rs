use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rulemeta_core::config::CoreConfig;

#[derive(Parser, Debug)]
#[command(name = "rulemeta-tui")]
#[command(about = "View a coding rule's metadata and edit its tags")]
pub struct Args {
    /// Key of the rule to show, e.g. squid:S1067
    #[arg(long, short = 'r')]
    pub rule_key: String,

    /// Path to JSON config file (baseUrl, token, canWrite)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Server base URL, overrides config and environment
    #[arg(long)]
    pub base_url: Option<String>,

    /// API token, overrides config and environment
    #[arg(long)]
    pub token: Option<String>,

    /// Allow editing tags
    #[arg(long)]
    pub can_write: bool,
}

impl Args {
    /// Config file (explicit path or the default location), then
    /// `RULEMETA_*` environment variables, then command-line flags.
    pub fn resolve_config(&self) -> Result<CoreConfig> {
        let mut config = match &self.config {
            Some(path) => CoreConfig::load(path)?,
            None => CoreConfig::load_default()?,
        };
        config.apply_env();
        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(&self, config: &mut CoreConfig) {
        config.apply_overrides(self.base_url.clone(), self.token.clone());
        if self.can_write {
            config.can_write = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rulemeta-tui").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_rule_key_is_required() {
        assert!(Args::try_parse_from(["rulemeta-tui"]).is_err());
        let args = parse(&["--rule-key", "squid:S1067"]);
        assert_eq!(args.rule_key, "squid:S1067");
        assert!(!args.can_write);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"baseUrl": "http://file:9000", "token": "from-file", "canWrite": false}"#,
        )
        .unwrap();

        let args = parse(&[
            "-r",
            "S1",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://flag:9000/",
            "--can-write",
        ]);
        let mut config = CoreConfig::load(args.config.as_ref().unwrap()).unwrap();
        args.apply_to(&mut config);

        assert_eq!(config.normalized_base_url(), "http://flag:9000");
        assert_eq!(config.token.as_deref(), Some("from-file"));
        assert!(config.can_write);
    }

    #[test]
    fn test_missing_flags_keep_file_values() {
        let mut config = CoreConfig::new("http://file:9000");
        config.can_write = true;
        parse(&["-r", "S1", "--token", ""]).apply_to(&mut config);

        assert_eq!(config.base_url, "http://file:9000");
        assert!(config.token.is_none());
        assert!(config.can_write);
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let dir = tempdir().unwrap();
        let args = parse(&[
            "-r",
            "S1",
            "--config",
            dir.path().join("missing.json").to_str().unwrap(),
        ]);
        let err = args.resolve_config().unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
