use oas3::Spec;
use serde_json::Value;

use crate::{
  generator::{request::HOSTNAME_PLACEHOLDER, security::SecurityModel},
  utils::spec::SpecError,
};

/// A loaded OpenAPI document. Read-only once built.
#[derive(Debug, Clone)]
pub struct ApiDocument {
  spec: Spec,
  security: SecurityModel,
}

impl ApiDocument {
  /// Builds a document from its raw JSON form.
  ///
  /// Does not validate; see [`crate::utils::validate::validate`].
  pub fn from_value(raw: Value) -> Result<Self, SpecError> {
    let security = SecurityModel::from_raw(&raw)?;
    let spec = serde_path_to_error::deserialize(raw).map_err(SpecError::Document)?;
    Ok(Self { spec, security })
  }

  #[must_use]
  pub fn spec(&self) -> &Spec {
    &self.spec
  }

  #[must_use]
  pub fn security(&self) -> &SecurityModel {
    &self.security
  }

  /// URL of the first declared server, or the `{{hostname}}` placeholder.
  #[must_use]
  pub fn base_url(&self) -> &str {
    self
      .spec
      .servers
      .first()
      .map_or(HOSTNAME_PLACEHOLDER, |server| server.url.as_str())
  }

  #[must_use]
  pub fn title(&self) -> &str {
    &self.spec.info.title
  }
}
