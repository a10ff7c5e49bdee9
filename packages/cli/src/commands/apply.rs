use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{has_errors, EditSession, EditorOptions, Mutation, PageDocument};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document to edit
    pub file: PathBuf,

    /// JSON array of mutations, applied in order
    pub mutations: PathBuf,

    /// Apply and validate without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = fs::read_to_string(&args.mutations)
        .with_context(|| format!("Cannot read {}", args.mutations.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid mutation list in {}", args.mutations.display()))?;

    let mut doc = PageDocument::load(&args.file)?;
    apply_all(&mut doc, &mutations, config.editor_options())?;

    println!(
        "{} Applied {} mutations to {}",
        "✓".green(),
        mutations.len(),
        args.file.display()
    );

    let diagnostics = doc.validate();
    for diagnostic in &diagnostics {
        println!(
            "  {} [{}] {}: {}",
            diagnostic.level.to_string().yellow(),
            diagnostic.code,
            diagnostic.path,
            diagnostic.message
        );
    }
    if has_errors(&diagnostics) {
        return Err(anyhow!("Result does not validate, nothing saved"));
    }

    if args.dry_run {
        println!("{}", "Dry run, nothing saved".dimmed());
    } else {
        doc.save()?;
        info!(version = doc.version, "Saved edits");
        println!("{} Saved {}", "✓".green(), args.file.display());
    }

    Ok(())
}

/// Apply every mutation or none of them
fn apply_all(
    doc: &mut PageDocument,
    mutations: &[Mutation],
    options: EditorOptions,
) -> Result<()> {
    let mut session = EditSession::with_options(doc.clone(), options);
    session.begin_batch(format!("Apply {} mutations", mutations.len()));

    for (position, mutation) in mutations.iter().enumerate() {
        session.apply(mutation.clone()).with_context(|| {
            format!(
                "Mutation #{} ({}) was rejected, nothing applied",
                position + 1,
                mutation.name()
            )
        })?;
    }

    session.end_batch();
    *doc = session.into_document();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitecraft_editor::{DocumentKind, TreePath};

    fn doc() -> PageDocument {
        PageDocument::from_json(
            DocumentKind::Page,
            r#"[{ "id": "a", "type": "text" }, { "id": "b", "type": "text" }]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_all_is_all_or_nothing() {
        let mut doc = doc();
        let mutations: Vec<Mutation> = serde_json::from_value(json!([
            { "op": "move_block", "from": [0], "to": [1] },
            { "op": "delete_block", "path": [9] }
        ]))
        .unwrap();

        let err = apply_all(&mut doc, &mutations, EditorOptions::default()).unwrap_err();
        assert!(err.to_string().contains("#2"));
        assert_eq!(doc.tree().blocks()[0].id.as_str(), "a");
        assert_eq!(doc.version, 0);
    }

    #[test]
    fn test_apply_all_commits_on_success() {
        let mut doc = doc();
        let mutations = vec![Mutation::MoveBlock {
            from: TreePath::block(0),
            to: TreePath::block(1),
        }];

        apply_all(&mut doc, &mutations, EditorOptions::default()).unwrap();
        assert_eq!(doc.tree().blocks()[0].id.as_str(), "b");
    }
}
