//! Security schemes, requirements, and the headers they synthesize.
//!
//! The typed document model collapses an absent operation `security` field and an
//! explicit empty one into the same value, but the two mean different things: an
//! explicit `security: []` removes the global requirement for that operation. The
//! [`SecurityModel`] is therefore built from the raw document, keeping declaration
//! order for requirement groups and scheme names.

use std::collections::HashMap;

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use strum::Display;

use crate::{
  generator::{operation_registry::RENDERED_METHODS, request::placeholder},
  utils::refs::component_ref_name,
};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
const BEARER_VALUE: &str = "Bearer {{token}}";
const BASIC_VALUE: &str = "Basic {{credentials}}";

/// One alternative of a security requirement list: scheme name to required scopes.
///
/// All schemes within one requirement must be satisfied together; separate
/// requirements in a list are alternatives.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiKeyLocation {
  Header,
  Query,
  Cookie,
}

/// A security scheme declared under `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
  #[serde(rename = "apiKey")]
  ApiKey {
    name: String,
    #[serde(rename = "in")]
    location: ApiKeyLocation,
  },
  #[serde(rename = "http")]
  Http { scheme: String },
  #[serde(rename = "oauth2")]
  OAuth2,
  #[serde(rename = "openIdConnect")]
  OpenIdConnect,
  #[serde(rename = "mutualTLS")]
  MutualTls,
}

impl SecurityScheme {
  /// Returns the `(name, value)` header this scheme contributes to a request, if any.
  ///
  /// API keys outside of headers and mutual TLS contribute nothing here.
  #[must_use]
  pub fn header(&self) -> Option<(String, String)> {
    match self {
      Self::ApiKey {
        name,
        location: ApiKeyLocation::Header,
      } => Some((name.clone(), placeholder(name))),
      Self::ApiKey { .. } | Self::MutualTls => None,
      Self::Http { scheme } => {
        let value = match scheme.to_ascii_lowercase().as_str() {
          "bearer" => BEARER_VALUE.to_string(),
          "basic" => BASIC_VALUE.to_string(),
          _ => placeholder(scheme),
        };
        Some((AUTHORIZATION_HEADER.to_string(), value))
      }
      Self::OAuth2 | Self::OpenIdConnect => Some((AUTHORIZATION_HEADER.to_string(), BEARER_VALUE.to_string())),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum SecurityModelError {
  #[error("invalid security requirement list at {pointer}")]
  Requirement {
    pointer: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("invalid security scheme '{name}'")]
  Scheme {
    name: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("security scheme '{name}' references unknown scheme '{target}'")]
  DanglingReference { name: String, target: String },
}

/// Security requirements and schemes of a document.
#[derive(Debug, Clone, Default)]
pub struct SecurityModel {
  global: Vec<SecurityRequirement>,
  overrides: HashMap<(String, Method), Vec<SecurityRequirement>>,
  schemes: IndexMap<String, SecurityScheme>,
}

impl SecurityModel {
  /// Builds the model from a raw OpenAPI document.
  pub fn from_raw(raw: &Value) -> Result<Self, SecurityModelError> {
    let global = match raw.get("security") {
      Some(value) => parse_requirements(value, "/security")?,
      None => Vec::new(),
    };

    let mut overrides = HashMap::new();
    if let Some(paths) = raw.get("paths").and_then(Value::as_object) {
      for (path, item) in paths {
        let Some(item) = item.as_object() else {
          continue;
        };
        for method in RENDERED_METHODS {
          let key = method.as_str().to_ascii_lowercase();
          let Some(security) = item.get(&key).and_then(|op| op.get("security")) else {
            continue;
          };
          let pointer = format!("/paths/{}/{key}/security", escape_pointer(path));
          overrides.insert((path.clone(), method), parse_requirements(security, &pointer)?);
        }
      }
    }

    let schemes = match raw.pointer("/components/securitySchemes").and_then(Value::as_object) {
      Some(declared) => parse_schemes(declared)?,
      None => IndexMap::new(),
    };

    Ok(Self {
      global,
      overrides,
      schemes,
    })
  }

  /// Returns the requirement list that applies to an operation.
  ///
  /// An operation-level declaration, even an empty one, replaces the global list.
  #[must_use]
  pub fn requirements_for(&self, path: &str, method: &Method) -> &[SecurityRequirement] {
    self
      .overrides
      .get(&(path.to_string(), method.clone()))
      .unwrap_or(&self.global)
  }

  /// Returns the security header for an operation.
  ///
  /// Only the first requirement alternative is considered, and within it only the
  /// first named scheme. Combined schemes and further alternatives are ignored.
  #[must_use]
  pub fn header_for(&self, path: &str, method: &Method) -> Option<(String, String)> {
    let requirement = self.requirements_for(path, method).first()?;
    let (scheme_name, _) = requirement.first()?;
    self.schemes.get(scheme_name)?.header()
  }

  #[must_use]
  pub fn scheme(&self, name: &str) -> Option<&SecurityScheme> {
    self.schemes.get(name)
  }

  /// Iterates every requirement declared anywhere in the document.
  pub fn all_requirements(&self) -> impl Iterator<Item = &SecurityRequirement> {
    self.global.iter().chain(self.overrides.values().flatten())
  }
}

fn parse_requirements(value: &Value, pointer: &str) -> Result<Vec<SecurityRequirement>, SecurityModelError> {
  serde_json::from_value(value.clone()).map_err(|source| SecurityModelError::Requirement {
    pointer: pointer.to_string(),
    source,
  })
}

fn parse_schemes(
  declared: &serde_json::Map<String, Value>,
) -> Result<IndexMap<String, SecurityScheme>, SecurityModelError> {
  declared
    .iter()
    .map(|(name, value)| {
      let target = match value.get("$ref").and_then(Value::as_str) {
        Some(ref_path) => component_ref_name(ref_path, "securitySchemes")
          .and_then(|target| declared.get(target))
          .ok_or_else(|| SecurityModelError::DanglingReference {
            name: name.clone(),
            target: ref_path.to_string(),
          })?,
        None => value,
      };
      let scheme = serde_json::from_value(target.clone()).map_err(|source| SecurityModelError::Scheme {
        name: name.clone(),
        source,
      })?;
      Ok((name.clone(), scheme))
    })
    .collect()
}

fn escape_pointer(segment: &str) -> String {
  segment.replace('~', "~0").replace('/', "~1")
}
