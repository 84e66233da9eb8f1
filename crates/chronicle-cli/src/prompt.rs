use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use chronicle_core::{MetadataPrompt, MissingFields, PromptReply};

/// Terminal implementation of the metadata prompt: one round of questions per
/// file with missing metadata. Empty answers keep the unknown sentinels;
/// validation lives in the resolver.
pub struct ConsolePrompt;

impl MetadataPrompt for ConsolePrompt {
    fn request(&self, missing: &MissingFields) -> Result<PromptReply> {
        println!(
            "\n{} {}",
            style("Missing metadata for:").yellow().bold(),
            missing.file_name
        );
        println!("{}", style("Press Enter to skip any field.").dim());

        let theme = ColorfulTheme::default();
        let camera: String = Input::with_theme(&theme)
            .with_prompt("Camera name")
            .allow_empty(true)
            .interact_text()?;
        let year: String = Input::with_theme(&theme)
            .with_prompt("Year (YYYY)")
            .allow_empty(true)
            .interact_text()?;
        let month: String = Input::with_theme(&theme)
            .with_prompt("Month (1-12)")
            .allow_empty(true)
            .interact_text()?;

        Ok(PromptReply {
            camera,
            year,
            month,
        })
    }
}
