use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_common::BlockCollector;
use sitecraft_editor::{PageDocument, TreePath};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page, header or footer document
    pub file: PathBuf,
}

pub fn inspect(args: InspectArgs, _cwd: &str) -> Result<()> {
    let doc = PageDocument::load(&args.file)?;

    println!(
        "📄 {} ({:?}, {} blocks)",
        args.file.display().to_string().bright_white().bold(),
        doc.kind,
        doc.tree().block_count()
    );

    for line in outline(&doc) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per block: indented by depth, then path, type and id
fn outline(doc: &PageDocument) -> Vec<String> {
    BlockCollector::collect(doc.tree())
        .into_iter()
        .map(|(location, block)| {
            let depth = location.len() / 2;
            let path = TreePath::from_indices(location);
            let detail = match block.layout() {
                Some(layout) => format!(" [{}]", layout.preset),
                None => String::new(),
            };

            format!(
                "{}{} {}{} {}",
                "  ".repeat(depth + 1),
                path.to_string().dimmed(),
                block.block_type().as_str().cyan(),
                detail,
                block.id.as_str().dimmed()
            )
        })
        .collect()
}
