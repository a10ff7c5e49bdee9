use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_common::RealFileSystem;
use sitecraft_editor::SettingsStore;

#[derive(Debug, Args)]
pub struct UiArgs {
    /// Expand a sidebar section
    #[arg(long)]
    pub open: Vec<String>,

    /// Collapse a sidebar section
    #[arg(long)]
    pub close: Vec<String>,

    /// Flip a sidebar section
    #[arg(long)]
    pub toggle: Vec<String>,

    /// Remember this tab as the active one
    #[arg(long)]
    pub tab: Option<String>,
}

/// Show or change the persisted editor UI state
pub fn ui(args: UiArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = SettingsStore::open(RealFileSystem, config.get_settings_path(cwd))?;

    for section in &args.open {
        store.set_section_open(section, true)?;
    }
    for section in &args.close {
        store.set_section_open(section, false)?;
    }
    for section in &args.toggle {
        store.toggle_section(section)?;
    }
    if let Some(tab) = args.tab {
        store.set_active_tab(Some(tab))?;
    }

    let settings = store.settings();
    println!("{} {}", "⚙️".bright_blue(), store.path().display());
    println!(
        "   Open sections: {}",
        if settings.open_sections.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            settings
                .open_sections
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!(
        "   Active tab: {}",
        settings.active_tab.as_deref().unwrap_or("(none)")
    );

    Ok(())
}
