//! Interactive target picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `exo curves` and type a planet" UX
//!
//! The picker also lists `*.json` parameter files under the current working
//! directory so a saved parameter set can be chosen by number.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Default directory recursion depth for finding parameter files.
const DEFAULT_SEARCH_DEPTH: usize = 2;

/// What the user asked to plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A planet name to resolve through the catalog.
    Identifier(String),
    /// A JSON file of model inputs.
    ParamsFile(PathBuf),
}

/// Prompt for a planet name or a parameter file.
///
/// Behavior:
/// - list discovered `*.json` files (if any)
/// - accept either a number (from the list) or a planet name
/// - `q` cancels
pub fn prompt_for_target() -> Result<Target, AppError> {
    let files = discover_param_files();
    if !files.is_empty() {
        println!("Found {} parameter file(s):", files.len());
        for (idx, path) in files.iter().enumerate() {
            println!("{:>3}) {}", idx + 1, pretty_path(path));
        }
    }

    loop {
        if files.is_empty() {
            print!("Planet name (q to quit): ");
        } else {
            print!("Select a file by number (1-{}) or type a planet name (q to quit): ", files.len());
        }
        io::stdout()
            .flush()
            .map_err(|e| AppError::input(format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::input(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::input(
                "No input received. Provide a planet with `exo curves <NAME>`.",
            ));
        }

        match parse_choice(&input, &files) {
            Ok(Some(target)) => return Ok(target),
            Ok(None) => return Err(AppError::input("Canceled.")),
            Err(err) => {
                println!("{err}");
                continue;
            }
        }
    }
}

/// Interpret one line of picker input.
///
/// Returns `Ok(None)` when the user cancels. Only the line terminator is
/// stripped from a planet name; the catalog matches names exactly.
pub fn parse_choice(input: &str, files: &[PathBuf]) -> Result<Option<Target>, AppError> {
    let line = input.trim_end_matches(['\r', '\n']);
    let command = line.trim();
    if command.is_empty() {
        return Err(AppError::input("Enter a planet name."));
    }
    if command.eq_ignore_ascii_case("q") {
        return Ok(None);
    }

    if !files.is_empty() {
        if let Ok(choice) = command.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return Ok(Some(Target::ParamsFile(files[choice - 1].clone())));
            }
            return Err(AppError::input(
                format!("Invalid choice: {choice}. Enter a number between 1 and {}.", files.len()),
            ));
        }
    }

    Ok(Some(Target::Identifier(line.to_string())))
}

/// Discover `*.json` files under the current directory (deterministic order).
pub fn discover_param_files() -> Vec<PathBuf> {
    find_json_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_json_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_json_files_inner(root, 0, max_depth, &mut out);
    out.sort_by(|a, b| pretty_path(a).cmp(&pretty_path(b)));
    out
}

fn find_json_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            find_json_files_inner(&path, depth + 1, max_depth, out);
            continue;
        }

        if file_type.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                == Some(true)
        {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules" | ".venv")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pick_files_and_text_is_a_planet() {
        let files = vec![PathBuf::from("a.json"), PathBuf::from("b.json")];

        assert_eq!(
            parse_choice("2\n", &files).unwrap(),
            Some(Target::ParamsFile(PathBuf::from("b.json")))
        );
        assert_eq!(
            parse_choice("HAT-P-7 b\n", &files).unwrap(),
            Some(Target::Identifier("HAT-P-7 b".to_string()))
        );
        assert_eq!(parse_choice("Q", &files).unwrap(), None);
        assert!(parse_choice("3", &files).is_err());
        assert!(parse_choice("   ", &files).is_err());
    }

    #[test]
    fn planet_names_keep_surrounding_spaces() {
        assert_eq!(
            parse_choice(" HAT-P-7 b \r\n", &[]).unwrap(),
            Some(Target::Identifier(" HAT-P-7 b ".to_string()))
        );
        assert_eq!(parse_choice(" q \n", &[]).unwrap(), None);
    }

    #[test]
    fn numbers_are_names_when_no_files_exist() {
        assert_eq!(
            parse_choice("55", &[]).unwrap(),
            Some(Target::Identifier("55".to_string()))
        );
    }
}
