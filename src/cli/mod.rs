//! Interactive read loop: type a title, get recommendations.

use std::fmt::Write;

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{index::MovieIndex, services::recommendations, services::Enricher};

const PROMPT: &str = "Enter movie title: ";

/// What a single input line asks for
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Exit,
    Empty,
    Lookup(&'a str),
}

pub fn parse_line(line: &str) -> ReplCommand<'_> {
    let line = line.trim();
    if line.is_empty() {
        ReplCommand::Empty
    } else if line.eq_ignore_ascii_case("exit") {
        ReplCommand::Exit
    } else {
        ReplCommand::Lookup(line)
    }
}

pub fn banner(index: &MovieIndex) -> String {
    let example = index
        .movies()
        .first()
        .map(|movie| movie.title.as_str())
        .unwrap_or("Toy Story (1995)");

    format!(
        "Movie Recommender System Ready! ({} movies)\n\
         Type a movie name exactly from the list, e.g., {}\n\
         Type 'exit' to quit.\n",
        index.len(),
        example
    )
}

/// Output printed for one lookup
pub async fn lookup(index: &MovieIndex, enricher: &Enricher, title: &str, count: usize) -> String {
    if !index.contains(title) {
        return "Movie not found! Please try again.\n".to_string();
    }

    let results = recommendations::recommend_enriched(index, enricher, title, count).await;

    let mut out = String::from("\nTop Recommendations:\n");
    for result in &results {
        let recommendation = &result.recommendation;
        let _ = writeln!(
            out,
            "{}. {}  -  {}",
            recommendation.rank, recommendation.title, recommendation.genres
        );
        if let Some(enrichment) = &result.enrichment {
            if enricher.is_enabled() {
                let _ = writeln!(out, "   {}", enrichment.description());
                if let Some(url) = enrichment.details().and_then(|d| d.trailer_url()) {
                    let _ = writeln!(out, "   Trailer: {}", url);
                }
            }
        }
    }
    out
}

/// Where the read loop gets its input lines from
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError>;

    /// Records a line the user actually looked up
    fn remember(&mut self, _line: &str) {}
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.readline(prompt)
    }

    fn remember(&mut self, line: &str) {
        let _ = self.add_history_entry(line);
    }
}

/// Runs until `exit`, Ctrl-C or Ctrl-D.
pub async fn run(index: &MovieIndex, enricher: &Enricher, count: usize) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("{}", banner(index));

    let lookups = drive(&mut editor, index, enricher, count).await?;

    tracing::info!(lookups, "Read loop finished");
    Ok(())
}

/// Feeds lines from `source` through the lookup until it asks to stop.
/// Returns the number of lookups performed.
///
/// Must run on the multi-threaded runtime.
pub async fn drive<S: LineSource>(
    source: &mut S,
    index: &MovieIndex,
    enricher: &Enricher,
    count: usize,
) -> anyhow::Result<usize> {
    let mut lookups = 0;

    loop {
        // Terminal reads block; hand the worker over to the runtime meanwhile.
        let line = tokio::task::block_in_place(|| source.read_line(PROMPT));

        match line {
            Ok(line) => match parse_line(&line) {
                ReplCommand::Exit => break,
                ReplCommand::Empty => continue,
                ReplCommand::Lookup(title) => {
                    source.remember(title);
                    println!("{}", lookup(index, enricher, title, count).await);
                    lookups += 1;
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(lookups)
}
