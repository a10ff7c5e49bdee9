use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project directory (defaults to current directory)
    pub dir: Option<PathBuf>,

    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EMPTY_DOCUMENTS: [&str; 3] = ["index.json", "header.json", "footer.json"];

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let root = match &args.dir {
        Some(dir) => PathBuf::from(cwd).join(dir),
        None => PathBuf::from(cwd),
    };
    let config_path = root.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Sitecraft project...".bright_blue().bold()
    );

    let pages_dir = root.join(&args.pages_dir);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    for name in EMPTY_DOCUMENTS {
        let document = pages_dir.join(name);
        if !document.exists() {
            fs::write(&document, "[]\n")?;
            println!("  {} Created {}/{}", "✓".green(), args.pages_dir, name);
        }
    }

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        ..Config::default()
    };
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: sitecraft blocks");
    println!("  2. Run: sitecraft apply {}/index.json edits.json", args.pages_dir);
    println!("  3. Run: sitecraft check {}", args.pages_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_documents() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(
            InitArgs {
                dir: Some(PathBuf::from("site")),
                pages_dir: "pages".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let root = dir.path().join("site");
        assert!(root.join(DEFAULT_CONFIG_NAME).exists());
        for name in EMPTY_DOCUMENTS {
            let content = fs::read_to_string(root.join("pages").join(name)).unwrap();
            assert_eq!(content.trim(), "[]");
        }

        let config = Config::load(&root.display().to_string()).unwrap();
        assert_eq!(config.undo_levels, 100);
    }
}
