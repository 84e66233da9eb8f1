mod menu;
mod prompt;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use chronicle_core::{organize, OrganizeOptions, Settings};

use crate::prompt::ConsolePrompt;

#[derive(Parser)]
#[command(
    name = "chronicle",
    version,
    about = "Organize and catalog photos and videos using capture metadata"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one organizing pass directly, without the menu
    Organize {
        /// Source folder containing your photos
        src: PathBuf,

        /// Destination folder (default: same as source)
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Move files instead of copying them
        #[arg(long = "move")]
        move_files: bool,

        /// Disable interactive prompts for missing metadata
        #[arg(long)]
        no_interactive: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    // Dialoguer hides the cursor; put it back on Ctrl-C before dying.
    ctrlc::set_handler(|| {
        let _ = console::Term::stdout().show_cursor();
        std::process::exit(130);
    })?;

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Organize {
            src,
            dest,
            move_files,
            no_interactive,
        }) => run_organize(src, dest, move_files, no_interactive),
        None => menu::run(),
    }
}

fn run_organize(
    src: PathBuf,
    dest: Option<PathBuf>,
    move_files: bool,
    no_interactive: bool,
) -> Result<()> {
    let settings = Settings::load();
    let destination = dest.unwrap_or_else(|| src.clone());
    let options = OrganizeOptions::from_settings(&settings, src, destination, move_files);

    info!(
        "Direct organize: {} -> {}",
        options.source.display(),
        options.destination.display()
    );
    let console_prompt = ConsolePrompt;
    let prompt = if no_interactive {
        None
    } else {
        Some(&console_prompt as &dyn chronicle_core::MetadataPrompt)
    };
    let report = organize(&options, prompt)?;
    println!("{}", report.render());
    Ok(())
}
