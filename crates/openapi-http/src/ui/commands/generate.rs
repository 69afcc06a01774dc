use std::{io::IsTerminal, path::PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    document::ApiDocument,
    metrics::RenderStats,
    operation_registry::OperationFilter,
    orchestrator::{NoMatchingOperations, Orchestrator, RenderOutput},
  },
  ui::{Colors, GenerateCommand},
  utils::spec::{SpecFormat, SpecLoader, SpecSource},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// How a generate run ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
  Rendered,
  NoMatch,
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: SpecSource,
  pub filter: OperationFilter,
  pub output: Option<PathBuf>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      operation_id,
      path,
      tag,
      output,
      verbose,
      quiet,
    } = command;

    if let Some(ref path) = path
      && !path.starts_with('/')
    {
      anyhow::bail!("Path filter '{path}' must start with '/'");
    }

    Ok(Self {
      input,
      filter: OperationFilter { operation_id, path, tag },
      output,
      verbose,
      quiet,
    })
  }

  /// Progress goes to stderr when the requests themselves go to stdout.
  #[must_use]
  pub const fn logs_to_stderr(&self) -> bool {
    self.output.is_none()
  }

  async fn write_output(&self, text: &str) -> anyhow::Result<()> {
    let Some(output) = &self.output else {
      print!("{text}");
      return Ok(());
    };

    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, text).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn emit(&self, line: &str) {
    if self.config.logs_to_stderr() {
      eprintln!("{line}");
    } else {
      println!("{line}");
    }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      self.emit(&format!("{} {message}", format_timestamp().with(self.colors.timestamp())));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      self.emit(&format!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      ));
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_document(&self, format: SpecFormat, document: &ApiDocument) {
    if self.config.verbose {
      self.stat("Format:", format.to_string());
      self.stat("Title:", document.title().to_string());
      self.stat("Base URL:", document.base_url().to_string());
    }
  }

  fn log_rendering(&self) {
    let message = if self.config.filter.is_empty() {
      "Rendering all operations...".to_string()
    } else {
      format!("Rendering operations matching {}...", self.config.filter)
    };
    self.info(&message.with(self.colors.primary()).to_string());
  }

  fn print_rendered(&self, output: &RenderOutput) {
    if !self.config.verbose || self.config.quiet {
      return;
    }
    for operation in &output.rendered {
      self.emit(&format!("              {}", operation.as_str().with(self.colors.info())));
    }
  }

  fn print_statistics(&self, stats: &RenderStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Operations matched:", stats.operations_matched.to_string());
    self.stat("Requests rendered:", stats.requests_rendered.to_string());
    self.stat("", format!("{} with body", stats.bodies_rendered));
    self.stat("", format!("{} with auth header", stats.authenticated_requests));
    if stats.failures() > 0 {
      self.stat("Failed:", stats.failures().to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &RenderStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_failure() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        eprintln!();
        printed_header = true;
      }

      let label = if warning.is_failure() { "Failed:" } else { "Skipped:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    if let Some(output) = &self.config.output {
      self.info(
        &format!("Writing to: {}", output.display())
          .with(self.colors.primary())
          .to_string(),
      );
    }
  }

  fn log_no_match(&self, err: &NoMatchingOperations) {
    eprintln!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      err.to_string().with(self.colors.accent())
    );
  }

  fn log_success(&self, stats: &RenderStats) {
    if !self.config.quiet {
      self.emit("");
      self.emit(&format!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {} request(s)", stats.requests_rendered).with(self.colors.success())
      ));
    }
  }
}

/// Colors for progress lines follow whichever stream they are written to.
#[must_use]
pub fn log_stream_is_terminal(config: &GenerateConfig) -> bool {
  if config.logs_to_stderr() {
    std::io::stderr().is_terminal()
  } else {
    std::io::stdout().is_terminal()
  }
}

pub async fn generate_requests(config: GenerateConfig, colors: &Colors) -> anyhow::Result<GenerateOutcome> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let loader = SpecLoader::open(&config.input).await?;
  let document = loader.load()?;
  logger.log_document(loader.format(), &document);

  logger.log_rendering();
  let orchestrator = Orchestrator::new(document, config.filter.clone());
  let output = match orchestrator.render_requests() {
    Ok(output) => output,
    Err(err) => {
      logger.log_no_match(&err);
      return Ok(GenerateOutcome::NoMatch);
    }
  };
  logger.print_rendered(&output);
  logger.print_statistics(&output.stats);

  logger.log_writing();
  config.write_output(&output.text).await?;

  logger.log_success(&output.stats);
  Ok(GenerateOutcome::Rendered)
}
