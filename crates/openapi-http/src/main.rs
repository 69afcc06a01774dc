#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use std::process::ExitCode;

use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors, commands::GenerateOutcome};

mod generator;
mod ui;
mod utils;

#[cfg(test)]
mod tests;

/// Exit code when no operation matches the filters.
const EXIT_NO_MATCH: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  let cli = Cli::parse();
  let theme = colors::detect_theme(cli.theme);

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input, tag } => {
        let colors = Colors::new(colors::stdout_colors_enabled(cli.color), theme);
        ui::commands::list_operations(&input, tag, &colors).await?;
      }
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command)?;
      let enabled = colors::colors_enabled(cli.color, ui::commands::log_stream_is_terminal(&config));
      let colors = Colors::new(enabled, theme);
      if ui::commands::generate_requests(config, &colors).await? == GenerateOutcome::NoMatch {
        return Ok(ExitCode::from(EXIT_NO_MATCH));
      }
    }
  }

  Ok(ExitCode::SUCCESS)
}
