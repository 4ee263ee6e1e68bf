use dialoguer::Input;

use super::{exit_if_failures, print_outcome, running_spinner, Action};
use crate::error::Result;
use crate::updater::Updater;

/// One round of input against the displayed package list.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Every installed package.
    All,
    /// Zero-based indices into the displayed list. Duplicates are kept.
    Picked(Vec<usize>),
    /// Rejected, with the message to show before asking again.
    Invalid(String),
    /// Nothing entered, ask again without comment.
    Empty,
}

/// Parse one line of selection input against a list of `count` entries.
/// Tokens that are not plain numbers are dropped, an out-of-range
/// number discards the whole line.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let choice = input.trim().to_lowercase();

    if choice == "all" {
        return Selection::All;
    }

    if choice.is_empty() {
        return Selection::Empty;
    }

    let tokens: Vec<&str> = choice
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
        .collect();

    if tokens.is_empty() {
        return Selection::Invalid(
            "Invalid input. Please enter numbers separated by commas.".to_string(),
        );
    }

    let mut picked = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => picked.push(n - 1),
            _ => return Selection::Invalid(format!("Invalid number: {}", token)),
        }
    }

    Selection::Picked(picked)
}

/// Show the installed packages and update the ones the user picks.
pub async fn execute(updater: &Updater) -> Result<()> {
    let selected = select_packages(updater);

    if selected.is_empty() {
        println!("No packages selected for update.");
        return Ok(());
    }

    println!("\nUpdating {} selected packages...", selected.len());

    let mut failures = 0;
    for id in &selected {
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

/// Prompt until the user picks packages, cancels, or nothing is
/// installed. Cancellation comes back as an empty selection.
fn select_packages(updater: &Updater) -> Vec<String> {
    let installed = updater.installed();
    if installed.is_empty() {
        return Vec::new();
    }

    super::list::render(updater);
    println!();

    loop {
        let input = match Input::<String>::new()
            .with_prompt("Enter package numbers to update (e.g., 1,3,5) or 'all'")
            .allow_empty(true)
            .interact_text()
        {
            Ok(input) => input,
            Err(_) => {
                println!("\nOperation cancelled.");
                return Vec::new();
            }
        };

        match parse_selection(&input, installed.len()) {
            Selection::All => return installed.to_vec(),
            Selection::Picked(indices) => {
                return indices.iter().map(|&i| installed[i].clone()).collect()
            }
            Selection::Invalid(message) => println!("{}", message),
            Selection::Empty => continue,
        }
    }
}
