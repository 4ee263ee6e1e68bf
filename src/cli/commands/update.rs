use console::style;

use super::{exit_if_failures, print_outcome, running_spinner, Action};
use crate::error::Result;
use crate::updater::Updater;

/// Update the named packages, in the order given.
pub async fn execute(updater: &Updater, packages: &[String]) -> Result<()> {
    let mut failures = 0;

    for id in packages {
        if !updater.registry().contains(id) {
            println!("Package '{}' not found in configuration", id);
            failures += 1;
            continue;
        }

        if !updater.is_installed(id) {
            println!("Package '{}' is not installed", id);
            failures += 1;
            continue;
        }

        let spinner = running_spinner(Action::Update, id);
        let result = updater.update_one(id).await;
        spinner.finish_and_clear();

        print_outcome(id, Action::Update, &result);
        if !result.success {
            failures += 1;
        }
    }

    exit_if_failures(failures)
}

/// Update every installed package, then print a summary block.
pub async fn execute_all(updater: &Updater) -> Result<()> {
    if updater.installed().is_empty() {
        println!("No packages from the configured list are installed.");
    } else {
        println!("Updating {} packages...", updater.installed().len());
    }

    let results = updater
        .update_all(|id, result| {
            if result.success {
                println!("{} {} updated successfully", style("✓").green(), id);
            } else {
                println!("{} {} update failed", style("✗").red(), id);
            }
        })
        .await;

    println!("\n{}", "=".repeat(50));
    println!("UPDATE SUMMARY");
    println!("{}", "=".repeat(50));

    let mut failures = 0;
    for (id, result) in &results {
        if result.success {
            println!("{}: {}", id, style("SUCCESS").green());
        } else {
            failures += 1;
            println!("{}: {}", id, style("FAILED").red());

            let detail = result.output.trim();
            if !detail.is_empty() {
                println!("  Error: {}", detail);
            }
        }
    }

    exit_if_failures(failures)
}
