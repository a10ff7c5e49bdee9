use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_blocks::{create_block, registry, BlockType, FactoryOptions, IdGenerator, LayoutPreset};

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Print a new block of this type as JSON instead of listing the registry
    #[arg(short = 't', long = "type")]
    pub block_type: Option<String>,

    /// Column preset for new layout blocks (defaults to config)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Derive ids from this seed instead of random UUIDs
    #[arg(long)]
    pub seed: Option<String>,
}

pub fn blocks(args: BlocksArgs, cwd: &str) -> Result<()> {
    let Some(type_name) = &args.block_type else {
        print_registry();
        return Ok(());
    };

    let config = Config::load(cwd)?;
    let block_type: BlockType = type_name.parse()?;
    let preset = match &args.preset {
        Some(preset) => preset.parse::<LayoutPreset>()?,
        None => config.default_preset,
    };
    if args.preset.is_some() && block_type != BlockType::Layout {
        return Err(anyhow!("--preset only applies to layout blocks"));
    }

    let mut ids = match &args.seed {
        Some(seed) => IdGenerator::sequential(seed.clone()),
        None => IdGenerator::random(),
    };
    let block = create_block(block_type, &FactoryOptions::with_preset(preset), &mut ids);

    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}

fn print_registry() {
    println!("{}", "🧱 Available blocks".bright_blue().bold());
    println!();

    for entry in registry() {
        let placement = if entry.singleton { "root only" } else { "" };

        println!(
            "  {:<14} {:<14} {:<10} {}",
            entry.block_type.as_str().bright_white(),
            entry.label,
            format!("{:?}", entry.category).dimmed(),
            placement.yellow()
        );
    }

    println!();
    let presets: Vec<&str> = LayoutPreset::ALL.iter().map(|p| p.as_str()).collect();
    println!("Layout presets: {}", presets.join(", "));
}
