use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::info;
use regex::Regex;
use walkdir::WalkDir;

use crate::{Result, SuiteError};

/// All files under `dir` whose name contains `term`, case-insensitively,
/// sorted by path.
pub fn find_matches(dir: &Path, term: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(SuiteError::Config(format!(
            "music directory does not exist: {}",
            dir.display()
        )));
    }

    let pattern = Regex::new(&format!("(?i){}", regex::escape(term)))
        .map_err(|e| SuiteError::Config(format!("bad search term '{term}': {e}")))?;

    let mut matches: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| pattern.is_match(name))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();
    matches.sort();
    Ok(matches)
}

fn print_results(term: &str, matches: &[PathBuf]) {
    if matches.is_empty() {
        println!("No results found for '{}'", term);
        return;
    }
    println!("\nFound {} results for '{}':", matches.len(), term);
    for path in matches {
        println!(" - {}", path.display());
    }
}

/// One-shot search for the initial term (when given), then an interactive
/// prompt loop until quit/exit/q or end of input.
pub fn run_interactive(dir: &Path, initial_term: Option<&str>) -> Result<()> {
    if let Some(term) = initial_term {
        print_results(term, &find_matches(dir, term)?);
    }

    println!("\nEnter search terms (artist/song) or 'quit' to exit:");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let term = line.trim();

        if matches!(term.to_lowercase().as_str(), "quit" | "exit" | "q") {
            info!("Exiting search mode");
            break;
        }
        if term.is_empty() {
            continue;
        }

        print_results(term, &find_matches(dir, term)?);
    }

    Ok(())
}
