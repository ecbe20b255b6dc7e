//! Check subcommand handler

use std::path::Path;

use anyhow::{bail, Context, Result};

use readalong::Chapter;

/// Validate a chapter and list every problem found.
///
/// Fails when there is at least one problem, so scripts can gate on it.
#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path) -> Result<()> {
    let chapter = Chapter::load(path)
        .with_context(|| format!("Failed to load chapter {}", path.display()))?;

    println!(
        "{}: {} sentence(s), {} note(s)",
        path.display(),
        chapter.len(),
        chapter.note_count()
    );

    let warnings = chapter.validate();
    if warnings.is_empty() {
        println!("OK");
        return Ok(());
    }

    for warning in &warnings {
        println!("  {}", warning);
    }
    bail!("{} problem(s) found", warnings.len())
}
