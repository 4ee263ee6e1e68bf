pub mod commands;

use std::time::Duration;

use clap::Parser;
use tracing::debug;

use crate::config::{self, AppConfig};
use crate::detect::PathProbe;
use crate::error::Result;
use crate::registry::Registry;
use crate::runner::ShellRunner;
use crate::updater::Updater;
use crate::utils::format_duration;

#[derive(Parser)]
#[command(name = "toolup")]
#[command(version)]
#[command(about = "Update user-installed packages from various sources")]
#[command(after_help = "Examples:
  toolup                      Interactive selection of packages to update
  toolup --all                Update all installed packages
  toolup crush qwen           Update specific packages
  toolup --list               List installed packages
  toolup --install fzf bat    Install specific packages")]
pub struct Cli {
    /// Packages to operate on
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Update all installed packages
    #[arg(long, conflicts_with_all = ["install", "packages"])]
    pub all: bool,

    /// Install packages instead of updating
    #[arg(long, requires = "packages")]
    pub install: bool,

    /// List installed packages and exit
    #[arg(long, conflicts_with_all = ["all", "install", "packages"])]
    pub list: bool,

    /// Per-command timeout (e.g. 300s, 5m)
    #[arg(long, value_name = "DURATION", env = "TOOLUP_TIMEOUT", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    config::parse_duration(s)
        .ok_or_else(|| format!("invalid duration '{}'. Use format like '5m', '300s' or '300'", s))
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = AppConfig::load()?;
        let timeout = self.timeout.unwrap_or_else(|| config.command_timeout());
        debug!("Command timeout: {}", format_duration(timeout.as_secs()));

        let registry = Registry::with_config(&config);
        debug!("Registry has {} packages", registry.len());

        let runner = ShellRunner::new(timeout);
        let mut updater = Updater::new(registry, Box::new(runner), Box::new(PathProbe));

        if self.list {
            return commands::list::execute(&updater);
        }

        if self.all {
            return commands::update::execute_all(&updater).await;
        }

        if self.install {
            return commands::install::execute(&mut updater, &self.packages).await;
        }

        if !self.packages.is_empty() {
            return commands::update::execute(&updater, &self.packages).await;
        }

        commands::interactive::execute(&updater).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targeted_update() {
        let cli = Cli::try_parse_from(["toolup", "crush", "qwen"]).unwrap();
        assert_eq!(cli.packages, vec!["crush", "qwen"]);
        assert!(!cli.all);
        assert!(!cli.install);
        assert!(!cli.list);
    }

    #[test]
    fn test_parse_no_arguments_is_interactive() {
        let cli = Cli::try_parse_from(["toolup"]).unwrap();
        assert!(cli.packages.is_empty());
        assert!(!cli.all);
    }

    #[test]
    fn test_all_conflicts_with_packages() {
        assert!(Cli::try_parse_from(["toolup", "--all", "crush"]).is_err());
        assert!(Cli::try_parse_from(["toolup", "--all", "--install", "crush"]).is_err());
    }

    #[test]
    fn test_list_conflicts_with_everything() {
        assert!(Cli::try_parse_from(["toolup", "--list", "--all"]).is_err());
        assert!(Cli::try_parse_from(["toolup", "--list", "--install", "fzf"]).is_err());
        assert!(Cli::try_parse_from(["toolup", "--list", "fzf"]).is_err());
    }

    #[test]
    fn test_install_requires_packages() {
        assert!(Cli::try_parse_from(["toolup", "--install"]).is_err());

        let cli = Cli::try_parse_from(["toolup", "--install", "fzf", "bat"]).unwrap();
        assert!(cli.install);
        assert_eq!(cli.packages, vec!["fzf", "bat"]);
    }

    #[test]
    fn test_parse_timeout_flag() {
        let cli = Cli::try_parse_from(["toolup", "--timeout", "10m", "--list"]).unwrap();
        assert_eq!(cli.timeout, Some(Duration::from_secs(600)));

        let cli = Cli::try_parse_from(["toolup", "--list"]).unwrap();
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn test_parse_invalid_timeout() {
        assert!(Cli::try_parse_from(["toolup", "--timeout", "soon", "--list"]).is_err());
    }
}
