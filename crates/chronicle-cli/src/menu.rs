use std::path::PathBuf;

use anyhow::Result;
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use log::warn;

use chronicle_core::{
    organize, MetadataPrompt, MonthFormat, OrganizeOptions, OrganizeScheme, Settings,
};

use crate::prompt::ConsolePrompt;

/// Main menu loop. Returns when the operator quits.
pub fn run() -> Result<()> {
    let term = Term::stdout();
    loop {
        term.clear_screen()?;
        println!(
            "{}",
            style("=== Chronicle - Photo Organization Tool ===")
                .cyan()
                .bold()
        );

        let items = ["Catalog new photos", "Settings", "Quit"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select an option")
            .items(&items)
            .default(0)
            .interact_on_opt(&term)?;

        match selection {
            Some(0) => catalog_photos(&term)?,
            Some(1) => settings_menu(&term)?,
            // ESC quits too.
            Some(2) | None => {
                println!(
                    "\n{}",
                    style("Thank you for using Chronicle. Goodbye!").green()
                );
                return Ok(());
            }
            _ => unreachable!(),
        }
    }
}

fn catalog_photos(term: &Term) -> Result<()> {
    println!("\n{}", style("--- Catalog New Photos ---").cyan().bold());
    let settings = Settings::load();

    let source = ask_source(&settings)?;
    let destination = ask_destination(&settings)?;
    let move_files = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Move files instead of copying?")
        .default(settings.default_move_files)
        .interact()?;

    let options = OrganizeOptions::from_settings(&settings, source, destination, move_files);
    println!("\nSource: {}", options.source.display());
    println!("Destination: {}", options.destination.display());
    println!("Mode: {}", if options.move_files { "MOVE" } else { "COPY" });
    println!("\nStarting photo organization...");

    match organize(&options, Some(&ConsolePrompt as &dyn MetadataPrompt)) {
        Ok(report) => {
            println!("\n{}", report.render());
            println!(
                "\n{}",
                style("Photo cataloging completed successfully!").green()
            );
        }
        Err(e) => {
            println!("\n{} {e:#}", style("Error during cataloging:").red().bold());
        }
    }
    pause(term)
}

fn ask_source(settings: &Settings) -> Result<PathBuf> {
    let theme = ColorfulTheme::default();
    loop {
        let mut input = Input::<String>::with_theme(&theme).with_prompt("Source directory");
        if !settings.default_source.is_empty() {
            input = input.default(settings.default_source.clone());
        }
        let entered = input.interact_text()?;
        let path = PathBuf::from(entered.trim());
        if path.is_dir() {
            return Ok(path);
        }
        println!(
            "{}",
            style(format!(
                "Directory does not exist or is not a directory: {}",
                path.display()
            ))
            .red()
        );
    }
}

fn ask_destination(settings: &Settings) -> Result<PathBuf> {
    let theme = ColorfulTheme::default();
    loop {
        let mut input = Input::<String>::with_theme(&theme).with_prompt("Destination directory");
        if !settings.default_destination.is_empty() {
            input = input.default(settings.default_destination.clone());
        }
        let entered = input.interact_text()?;
        let path = PathBuf::from(entered.trim());

        if path.is_dir() {
            return Ok(path);
        }
        if path.exists() {
            println!(
                "{}",
                style(format!("Path is not a directory: {}", path.display())).red()
            );
            continue;
        }
        let create = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Directory does not exist. Create it?")
            .default(true)
            .interact()?;
        if create {
            match std::fs::create_dir_all(&path) {
                Ok(()) => return Ok(path),
                Err(e) => println!(
                    "{}",
                    style(format!("Error creating directory: {e}")).red()
                ),
            }
        }
    }
}

fn settings_menu(term: &Term) -> Result<()> {
    loop {
        term.clear_screen()?;
        let mut settings = Settings::load();

        println!("{}", style("--- Settings ---").cyan().bold());
        println!(
            "  Default source:      {}",
            display_or_not_set(&settings.default_source)
        );
        println!(
            "  Default destination: {}",
            display_or_not_set(&settings.default_destination)
        );
        println!(
            "  Default move files:  {}",
            if settings.default_move_files { "Yes" } else { "No" }
        );
        println!("  Organization scheme: {}", settings.scheme().describe());
        println!("  Month format:        {}", settings.month_format().describe());
        println!(
            "  Separate file types: {}",
            if settings.separate_file_types { "Yes" } else { "No" }
        );
        println!();

        let items = [
            "Set default source directory",
            "Set default destination directory",
            "Set default move files preference",
            "Set organization scheme",
            "Set month format",
            "Set file type separation",
            "Reset all settings to defaults",
            "Back to main menu",
        ];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to configure?")
            .items(&items)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => {
                let entered: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Default source directory (empty to clear)")
                    .allow_empty(true)
                    .interact_text()?;
                let entered = entered.trim();
                if entered.is_empty() || PathBuf::from(entered).is_dir() {
                    settings.default_source = entered.to_string();
                    save(&settings);
                } else {
                    println!(
                        "{}",
                        style("Directory does not exist or is not a directory.").red()
                    );
                    pause(term)?;
                }
            }
            Some(1) => {
                // The destination may not exist yet; it is created at catalog
                // time.
                let entered: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Default destination directory (empty to clear)")
                    .allow_empty(true)
                    .interact_text()?;
                settings.default_destination = entered.trim().to_string();
                save(&settings);
            }
            Some(2) => {
                settings.default_move_files = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Move files by default?")
                    .default(settings.default_move_files)
                    .interact()?;
                save(&settings);
            }
            Some(3) => {
                let labels: Vec<&str> = OrganizeScheme::ALL
                    .iter()
                    .map(|scheme| scheme.describe())
                    .collect();
                if let Some(picked) = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Organization scheme")
                    .items(&labels)
                    .default(0)
                    .interact_on_opt(term)?
                {
                    settings.organization_scheme =
                        OrganizeScheme::ALL[picked].key().to_string();
                    save(&settings);
                }
            }
            Some(4) => {
                let labels: Vec<&str> = MonthFormat::ALL
                    .iter()
                    .map(|format| format.describe())
                    .collect();
                if let Some(picked) = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Month format")
                    .items(&labels)
                    .default(0)
                    .interact_on_opt(term)?
                {
                    settings.month_format = MonthFormat::ALL[picked].key().to_string();
                    save(&settings);
                }
            }
            Some(5) => {
                settings.separate_file_types = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Separate JPG/RAW/VIDEO into subfolders?")
                    .default(settings.separate_file_types)
                    .interact()?;
                save(&settings);
            }
            Some(6) => {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Reset all settings to defaults?")
                    .default(false)
                    .interact()?;
                if confirmed {
                    save(&Settings::default());
                }
            }
            Some(7) | None => return Ok(()),
            _ => unreachable!(),
        }
    }
}

fn display_or_not_set(value: &str) -> &str {
    if value.is_empty() {
        "Not set"
    } else {
        value
    }
}

fn save(settings: &Settings) {
    if let Err(e) = settings.save() {
        warn!("Could not save settings: {e:#}");
        println!("{} {e:#}", style("Failed to save settings:").red().bold());
    }
}

fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("Press Enter to continue...").dim());
    term.read_line()?;
    Ok(())
}
