use std::{
  convert::Infallible,
  ffi::OsStr,
  fmt,
  path::{Path, PathBuf},
  str::FromStr,
};

use reqwest::Url;
use serde_json::Value;
use strum::Display;

use crate::{
  generator::{document::ApiDocument, security::SecurityModelError},
  utils::validate::{ValidationReport, validate},
};

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
  #[error("failed to read spec file '{}'", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to fetch spec from '{url}'")]
  Fetch {
    url: Url,
    #[source]
    source: reqwest::Error,
  },
  #[error("spec is not valid JSON")]
  Json(#[source] serde_json::Error),
  #[error("spec is not valid YAML")]
  Yaml(#[source] serde_yaml::Error),
  #[error("spec is not a valid OpenAPI document")]
  Document(#[source] serde_path_to_error::Error<serde_json::Error>),
  #[error("spec has invalid security declarations")]
  Security(#[from] SecurityModelError),
  #[error("spec validation failed")]
  Validation(#[from] ValidationReport),
}

/// Where a specification is read from: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
  File(PathBuf),
  Url(Url),
}

impl SpecSource {
  fn extension(&self) -> Option<&str> {
    match self {
      Self::File(path) => path.extension().and_then(OsStr::to_str),
      Self::Url(url) => Path::new(url.path()).extension().and_then(OsStr::to_str),
    }
  }
}

impl FromStr for SpecSource {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match Url::parse(s) {
      Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Url(url)),
      _ => Ok(Self::File(PathBuf::from(s))),
    }
  }
}

impl fmt::Display for SpecSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Url(url) => write!(f, "{url}"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext {
      "yaml" | "yml" => Some(Self::Yaml),
      "json" => Some(Self::Json),
      _ => None,
    }
  }

  /// Picks the format from the extension, falling back to the first non-blank byte.
  #[must_use]
  pub fn detect(extension: Option<&str>, content: &[u8]) -> Self {
    if let Some(format) = extension.and_then(Self::from_extension) {
      return format;
    }
    match content.iter().find(|b| !b.is_ascii_whitespace()) {
      Some(b'{') | None => Self::Json,
      Some(_) => Self::Yaml,
    }
  }
}

/// Reads and parses an OpenAPI document.
pub struct SpecLoader {
  content: Vec<u8>,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(source: &SpecSource) -> Result<Self, SpecError> {
    let content = match source {
      SpecSource::File(path) => tokio::fs::read(path).await.map_err(|source| SpecError::Read {
        path: path.clone(),
        source,
      })?,
      SpecSource::Url(url) => fetch(url).await.map_err(|source| SpecError::Fetch {
        url: url.clone(),
        source,
      })?,
    };
    let format = SpecFormat::detect(source.extension(), &content);

    Ok(Self { content, format })
  }

  #[must_use]
  pub fn from_bytes(content: impl Into<Vec<u8>>, format: SpecFormat) -> Self {
    Self {
      content: content.into(),
      format,
    }
  }

  #[must_use]
  pub const fn format(&self) -> SpecFormat {
    self.format
  }

  /// Parses the document without validating it.
  pub fn parse(&self) -> Result<ApiDocument, SpecError> {
    let raw: Value = match self.format {
      SpecFormat::Json => serde_json::from_slice(&self.content).map_err(SpecError::Json)?,
      SpecFormat::Yaml => serde_yaml::from_slice(&self.content).map_err(SpecError::Yaml)?,
    };
    ApiDocument::from_value(raw)
  }

  /// Parses and validates the document.
  pub fn load(&self) -> Result<ApiDocument, SpecError> {
    let document = self.parse()?;
    validate(&document)?;
    Ok(document)
  }
}

async fn fetch(url: &Url) -> Result<Vec<u8>, reqwest::Error> {
  let response = reqwest::get(url.clone()).await?.error_for_status()?;
  Ok(response.bytes().await?.to_vec())
}
