use super::{exit_if_failures, print_outcome, running_spinner, Action};
use crate::error::Result;
use crate::updater::Updater;

/// Install the named packages, skipping ones already present.
pub async fn execute(updater: &mut Updater, packages: &[String]) -> Result<()> {
    let mut failures = 0;

    for id in packages {
        if !updater.registry().contains(id) {
            println!("Package '{}' not found in configuration", id);
            failures += 1;
            continue;
        }

        if updater.is_installed(id) {
            println!("Package '{}' is already installed", id);
            continue;
        }

        let spinner = running_spinner(Action::Install, id);
        let result = updater.install_one(id).await;
        spinner.finish_and_clear();

        print_outcome(id, Action::Install, &result);
        if !result.success {
            failures += 1;
        }
    }

    exit_if_failures(failures)
}
