//! Spans subcommand handler

use std::path::Path;

use anyhow::{bail, Context, Result};

use readalong::reader::segment;
use readalong::Chapter;

/// Print the span segmentation of one sentence (1-based) or all of them.
#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path, sentence: Option<usize>) -> Result<()> {
    let chapter = Chapter::load(path)
        .with_context(|| format!("Failed to load chapter {}", path.display()))?;

    let indices = match sentence {
        Some(n) if n == 0 || n > chapter.len() => bail!(
            "sentence {} out of range (chapter has {} sentence(s))",
            n,
            chapter.len()
        ),
        Some(n) => (n - 1)..n,
        None => 0..chapter.len(),
    };

    for index in indices {
        let sentence = &chapter.sentences[index];
        println!("{}. {}", index + 1, sentence.text);
        for span in segment(&sentence.text, &sentence.notes) {
            let range = format!("{}..{}", span.start, span.end);
            match &span.note {
                Some(note) => println!("   {:<8} {:?} = {}", range, span.text, note.meaning),
                None => println!("   {:<8} {:?}", range, span.text),
            }
        }
    }
    Ok(())
}
