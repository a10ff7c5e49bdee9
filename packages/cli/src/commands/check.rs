use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{Diagnostic, DiagnosticLevel, PageDocument};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Document or directory of documents to check (defaults to the pages directory)
    pub input: Option<PathBuf>,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Totals {
    diagnostics: usize,
    errors: usize,
    warnings: usize,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let input = match &args.input {
        Some(input) => input.clone(),
        None => Config::load(cwd)?.get_pages_dir(cwd),
    };

    println!("🔍 {} Sitecraft Checker", "Starting".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        let files = find_documents(&input);
        println!("   Found {} documents", files.len());
        println!();
        files
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    };

    let mut totals = Totals::default();
    for file in &files {
        let file_totals = check_file(file, args.verbose, &args.format)?;
        totals.diagnostics += file_totals.diagnostics;
        totals.errors += file_totals.errors;
        totals.warnings += file_totals.warnings;
    }

    println!();
    println!(
        "✨ {} Check complete!",
        if totals.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Documents checked: {}", files.len());
    println!("   Total diagnostics: {}", totals.diagnostics);

    if totals.errors > 0 {
        println!("   {} {}", "Errors:".red(), totals.errors);
    }
    if totals.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), totals.warnings);
    }
    if totals.errors == 0 && totals.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    // Exit with error code if there are errors
    if totals.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn check_file(file_path: &Path, verbose: bool, format: &str) -> Result<Totals> {
    let doc = match PageDocument::load(file_path) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{} Failed to load {}: {}", "✗".red(), file_path.display(), err);
            return Ok(Totals {
                diagnostics: 1,
                errors: 1,
                warnings: 0,
            });
        }
    };

    let diagnostics = doc.validate();
    let totals = count(&diagnostics);

    if diagnostics.is_empty() {
        if verbose {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return Ok(totals);
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(totals);
    }

    println!("{}", file_path.display());
    for diagnostic in &diagnostics {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        if !verbose && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        println!(
            "  {} [{}] {} {}",
            level_str,
            diagnostic.code,
            diagnostic.path.to_string().dimmed(),
            diagnostic.message
        );
    }
    println!();

    Ok(totals)
}

fn count(diagnostics: &[Diagnostic]) -> Totals {
    let errors = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .count();

    Totals {
        diagnostics: diagnostics.len(),
        errors,
        warnings,
    }
}

/// Every `*.json` under `dir` except config files
fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().map(|e| e == "json").unwrap_or(false)
                && path.file_name().map(|n| n != DEFAULT_CONFIG_NAME).unwrap_or(false)
                && !path.components().any(|c| c.as_os_str() == ".sitecraft")
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_documents_skips_config_and_settings() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::create_dir_all(root.join(".sitecraft")).unwrap();
        fs::write(root.join(DEFAULT_CONFIG_NAME), "{}").unwrap();
        fs::write(root.join(".sitecraft/ui.json"), "{}").unwrap();
        fs::write(root.join("pages/index.json"), "[]").unwrap();
        fs::write(root.join("pages/header.json"), "[]").unwrap();
        fs::write(root.join("pages/notes.txt"), "").unwrap();

        let names: Vec<String> = find_documents(root)
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["header.json", "index.json"]);
    }

    #[test]
    fn test_check_file_counts_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(
            &path,
            r#"[
                { "id": "a", "type": "text", "data": { "anchorId": "Bad Anchor" } },
                { "id": "a", "type": "text" }
            ]"#,
        )
        .unwrap();

        let totals = check_file(&path, false, "text").unwrap();
        assert_eq!(
            totals,
            Totals {
                diagnostics: 2,
                errors: 1,
                warnings: 1,
            }
        );
    }
}
