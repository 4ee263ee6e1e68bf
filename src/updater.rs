//! Update and install orchestration over the package registry.

use tracing::{debug, error, info};

use crate::detect::PresenceProbe;
use crate::registry::Registry;
use crate::runner::{CommandExecutor, CommandOutput};

/// Coordinates presence detection and command execution for the
/// packages in a [`Registry`].
pub struct Updater {
    registry: Registry,
    runner: Box<dyn CommandExecutor>,
    probe: Box<dyn PresenceProbe>,
    /// Ids of registry packages found on the search path, sorted.
    installed: Vec<String>,
}

impl Updater {
    pub fn new(
        registry: Registry,
        runner: Box<dyn CommandExecutor>,
        probe: Box<dyn PresenceProbe>,
    ) -> Self {
        let mut updater = Self {
            registry,
            runner,
            probe,
            installed: Vec::new(),
        };
        updater.refresh_installed();
        updater
    }

    /// Probe the search path again for every registry entry.
    pub fn refresh_installed(&mut self) {
        let mut installed: Vec<String> = self
            .registry
            .iter()
            .filter(|p| self.probe.is_present(&p.executable))
            .map(|p| p.id.clone())
            .collect();
        installed.sort_unstable();
        debug!("Installed packages: {:?}", installed);
        self.installed = installed;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Installed package ids, sorted.
    pub fn installed(&self) -> &[String] {
        &self.installed
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.installed.iter().any(|p| p == id)
    }

    /// Run a package's upgrade command.
    pub async fn update_one(&self, id: &str) -> CommandOutput {
        let Some(package) = self.registry.get(id) else {
            return CommandOutput::failure(format!(
                "Package '{}' not found in configuration",
                id
            ));
        };

        if !self.is_installed(id) {
            return CommandOutput::failure(format!("Package '{}' is not installed", id));
        }

        info!("Updating {}", id);
        let result = self.runner.run(&package.upgrade).await;
        if !result.success {
            error!("Update of {} failed", id);
        }

        result
    }

    /// Run a package's install command. On success the installed set
    /// is probed again so the new executable is picked up.
    pub async fn install_one(&mut self, id: &str) -> CommandOutput {
        let install = match self.registry.get(id) {
            Some(package) => package.install.clone(),
            None => {
                return CommandOutput::failure(format!(
                    "Package '{}' not found in configuration",
                    id
                ))
            }
        };

        if self.is_installed(id) {
            return CommandOutput::failure(format!("Package '{}' is already installed", id));
        }

        info!("Installing {}", id);
        let result = self.runner.run(&install).await;

        if result.success {
            self.refresh_installed();
        } else {
            error!("Install of {} failed", id);
        }

        result
    }

    /// Update every installed package in order. A failure does not stop
    /// the run. Each outcome is handed to `on_result` as it lands, then
    /// all of them come back together.
    pub async fn update_all<F>(&self, mut on_result: F) -> Vec<(String, CommandOutput)>
    where
        F: FnMut(&str, &CommandOutput),
    {
        let targets = self.installed.to_vec();
        let mut results = Vec::with_capacity(targets.len());

        for id in targets {
            let result = self.update_one(&id).await;
            on_result(&id, &result);
            results.push((id, result));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    struct SpyExecutor {
        commands: Arc<Mutex<Vec<String>>>,
        fail_matching: Option<&'static str>,
    }

    #[async_trait]
    impl CommandExecutor for SpyExecutor {
        async fn run(&self, command: &str) -> CommandOutput {
            self.commands.lock().unwrap().push(command.to_string());
            let fails = self
                .fail_matching
                .is_some_and(|pattern| command.contains(pattern));
            if fails {
                CommandOutput::failure("boom")
            } else {
                CommandOutput {
                    success: true,
                    output: String::new(),
                }
            }
        }
    }

    struct FixedProbe {
        present: Vec<&'static str>,
    }

    impl PresenceProbe for FixedProbe {
        fn is_present(&self, executable: &str) -> bool {
            self.present.contains(&executable)
        }
    }

    /// Probe over a shared set, so an executor can make executables
    /// appear mid-test.
    struct SharedProbe {
        present: Arc<Mutex<HashSet<String>>>,
    }

    impl PresenceProbe for SharedProbe {
        fn is_present(&self, executable: &str) -> bool {
            self.present.lock().unwrap().contains(executable)
        }
    }

    struct MarkingExecutor {
        commands: Arc<Mutex<Vec<String>>>,
        present: Arc<Mutex<HashSet<String>>>,
        adds: &'static str,
    }

    #[async_trait]
    impl CommandExecutor for MarkingExecutor {
        async fn run(&self, command: &str) -> CommandOutput {
            self.commands.lock().unwrap().push(command.to_string());
            self.present.lock().unwrap().insert(self.adds.to_string());
            CommandOutput {
                success: true,
                output: String::new(),
            }
        }
    }

    fn updater_with(
        present: Vec<&'static str>,
        fail_matching: Option<&'static str>,
    ) -> (Updater, Arc<Mutex<Vec<String>>>) {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let updater = Updater::new(
            Registry::builtin(),
            Box::new(SpyExecutor {
                commands: commands.clone(),
                fail_matching,
            }),
            Box::new(FixedProbe { present }),
        );
        (updater, commands)
    }

    #[test]
    fn test_installed_maps_executables_to_ids() {
        let (updater, _) = updater_with(vec!["rg", "fzf"], None);
        assert_eq!(updater.installed(), &["fzf", "fzf-alt", "ripgrep"]);
        assert!(updater.is_installed("ripgrep"));
        assert!(!updater.is_installed("rg"));
    }

    #[tokio::test]
    async fn test_update_unknown_package() {
        let (updater, commands) = updater_with(vec!["lazygit"], None);
        let result = updater.update_one("nope").await;
        assert!(!result.success);
        assert_eq!(result.output, "Package 'nope' not found in configuration");
        assert!(commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_not_installed() {
        let (updater, commands) = updater_with(vec![], None);
        let result = updater.update_one("lazygit").await;
        assert!(!result.success);
        assert_eq!(result.output, "Package 'lazygit' is not installed");
        assert!(commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_runs_upgrade_command() {
        let (updater, commands) = updater_with(vec!["lazygit"], None);
        let result = updater.update_one("lazygit").await;
        assert!(result.success);
        assert_eq!(*commands.lock().unwrap(), vec!["brew upgrade lazygit"]);
    }

    #[tokio::test]
    async fn test_install_already_installed() {
        let (mut updater, commands) = updater_with(vec!["lazygit"], None);
        let result = updater.install_one("lazygit").await;
        assert!(!result.success);
        assert_eq!(result.output, "Package 'lazygit' is already installed");
        assert!(commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_install_unknown_package() {
        let (mut updater, commands) = updater_with(vec![], None);
        let result = updater.install_one("nope").await;
        assert!(!result.success);
        assert_eq!(result.output, "Package 'nope' not found in configuration");
        assert!(commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_install_makes_package_visible() {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let present = Arc::new(Mutex::new(HashSet::from(["lazygit".to_string()])));
        let mut updater = Updater::new(
            Registry::builtin(),
            Box::new(MarkingExecutor {
                commands: commands.clone(),
                present: present.clone(),
                adds: "tmux",
            }),
            Box::new(SharedProbe {
                present: present.clone(),
            }),
        );
        assert_eq!(updater.installed(), &["lazygit"]);

        // Updating something absent runs nothing.
        let result = updater.update_one("tmux").await;
        assert!(!result.success);
        assert!(commands.lock().unwrap().is_empty());

        // Installing it runs its install command and refreshes the set.
        let result = updater.install_one("tmux").await;
        assert!(result.success);
        assert_eq!(
            *commands.lock().unwrap(),
            vec!["apt install tmux 2>/dev/null || brew install tmux"]
        );
        assert_eq!(updater.installed(), &["lazygit", "tmux"]);
        assert!(updater.is_installed("tmux"));
    }

    #[tokio::test]
    async fn test_install_failure_keeps_installed_set() {
        let (mut updater, commands) = updater_with(vec![], Some(""));
        let result = updater.install_one("tmux").await;
        assert!(!result.success);
        assert_eq!(result.output, "boom");
        assert_eq!(commands.lock().unwrap().len(), 1);
        assert!(updater.installed().is_empty());
    }

    #[tokio::test]
    async fn test_update_all_runs_each_in_order() {
        let (updater, commands) = updater_with(vec!["lazygit", "tmux"], None);
        let mut seen = Vec::new();
        let results = updater
            .update_all(|id, result| seen.push((id.to_string(), result.success)))
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(seen, vec![("lazygit".to_string(), true), ("tmux".to_string(), true)]);
        assert_eq!(
            *commands.lock().unwrap(),
            vec![
                "brew upgrade lazygit",
                "apt upgrade tmux 2>/dev/null || brew upgrade tmux",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_all_continues_after_failure() {
        let (updater, commands) = updater_with(vec!["lazygit", "tmux"], Some("lazygit"));
        let results = updater.update_all(|_, _| {}).await;

        assert_eq!(results.len(), 2);
        assert!(!results[0].1.success);
        assert!(results[1].1.success);
        assert_eq!(commands.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_all_with_nothing_installed() {
        let (updater, commands) = updater_with(vec![], None);
        let mut called = 0;
        let results = updater.update_all(|_, _| called += 1).await;

        assert!(results.is_empty());
        assert_eq!(called, 0);
        assert!(commands.lock().unwrap().is_empty());
    }
}
