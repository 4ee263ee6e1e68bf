use console::style;

use crate::error::Result;
use crate::updater::Updater;

/// List installed packages with their source tags.
pub fn execute(updater: &Updater) -> Result<()> {
    if updater.installed().is_empty() {
        println!("No packages from the configured list are installed.");
        return Ok(());
    }

    render(updater);
    Ok(())
}

/// Numbered package listing, shared with the interactive prompt.
pub(crate) fn render(updater: &Updater) {
    println!("\n{}", style("Installed packages:").bold());

    for (i, id) in updater.installed().iter().enumerate() {
        let source = updater
            .registry()
            .get(id)
            .map(|p| p.source.as_str())
            .unwrap_or("unknown");

        println!(
            "  {}. {} {}",
            i + 1,
            id,
            style(format!("(source: {})", source)).dim()
        );
    }
}
