pub mod install;
pub mod interactive;
pub mod list;
pub mod update;

use std::time::Duration;

use console::style;
use indicatif::ProgressBar;

use crate::error::Result;
use crate::runner::CommandOutput;

/// What a package command was asked to do, for progress and outcome lines.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    Update,
    Install,
}

impl Action {
    fn running(self) -> &'static str {
        match self {
            Action::Update => "Updating",
            Action::Install => "Installing",
        }
    }

    fn succeeded(self) -> &'static str {
        match self {
            Action::Update => "updated successfully",
            Action::Install => "installed successfully",
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Action::Update => "update failed",
            Action::Install => "installation failed",
        }
    }
}

/// Spinner shown while a package command runs.
pub(crate) fn running_spinner(action: Action, id: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("{} {}...", action.running(), id));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the outcome line for one package, command output indented
/// under it.
pub(crate) fn print_outcome(id: &str, action: Action, result: &CommandOutput) {
    let detail = result.output.trim();

    if result.success {
        println!("{} {} {}", style("✓").green(), id, action.succeeded());
        if !detail.is_empty() {
            println!("  {}", style(detail).dim());
        }
    } else {
        println!("{} {} {}", style("✗").red(), id, action.failed());
        if !detail.is_empty() {
            println!("  Error: {}", detail);
        }
    }
}

/// Exit non-zero once all output has been printed.
pub(crate) fn exit_if_failures(failures: usize) -> Result<()> {
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
