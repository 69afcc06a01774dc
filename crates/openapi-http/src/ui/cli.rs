use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::utils::spec::SpecSource;

#[derive(Parser, Debug)]
#[command(name = "openapi-http")]
#[command(author, version, about = "Generate .http request files from OpenAPI specifications")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate .http requests from an OpenAPI specification
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path or http(s) URL of the OpenAPI specification (JSON or YAML)
  #[arg(short, long, value_name = "SPEC")]
  pub input: SpecSource,

  /// Render only the operation with this operationId
  #[arg(long, value_name = "ID")]
  pub operation_id: Option<String>,

  /// Render only operations on this exact path template
  #[arg(short, long, value_name = "PATH")]
  pub path: Option<String>,

  /// Render only operations carrying this tag
  #[arg(short, long, value_name = "TAG")]
  pub tag: Option<String>,

  /// File to write the requests to (stdout when omitted)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the OpenAPI specification
  Operations {
    /// Path or http(s) URL of the OpenAPI specification (JSON or YAML)
    #[arg(short, long, value_name = "SPEC")]
    input: SpecSource,

    /// Show only operations carrying this tag
    #[arg(short, long, value_name = "TAG")]
    tag: Option<String>,
  },
}
