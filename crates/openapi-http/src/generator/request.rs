use std::fmt;

use http::Method;
use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::Value;

pub const REQUEST_SEPARATOR: &str = "###";
pub const HOSTNAME_PLACEHOLDER: &str = "{{hostname}}";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Wraps a name in a `{{name}}` placeholder token.
#[must_use]
pub fn placeholder(name: &str) -> String {
  format!("{{{{{name}}}}}")
}

/// Formats a value for use inside a request line or header.
///
/// # Example
/// ```text
/// "active"        => active
/// 10              => 10
/// ["a", "b"]      => a,b
/// {"k": "v"}      => {"k":"v"}
/// ```
#[must_use]
pub fn format_parameter_value(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Null => String::new(),
    Value::Array(items) => items.iter().map(format_parameter_value).join(","),
    Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
  }
}

/// Formats a query value. Sequences contribute only their first element.
#[must_use]
pub fn format_query_value(value: &Value) -> String {
  match value {
    Value::Array(items) if !items.is_empty() => format_parameter_value(&items[0]),
    _ => format_parameter_value(value),
  }
}

/// One request of a `.http` file.
///
/// Rendered as:
/// ```text
/// ###
/// # @name <operationId>
/// # <summary>
///
/// <METHOD> <url>[?<query>]
/// <Header-Name>: <value>
///
/// <body>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct HttpRequest {
  pub name: Option<String>,
  pub summary: Option<String>,
  pub method: Method,
  #[builder(into)]
  pub url: String,
  #[builder(default)]
  pub query: Vec<(String, String)>,
  #[builder(default)]
  pub headers: IndexMap<String, String>,
  pub body: Option<String>,
}

impl HttpRequest {
  /// Returns the request target: URL plus query string, if any.
  #[must_use]
  pub fn target(&self) -> String {
    if self.query.is_empty() {
      return self.url.clone();
    }
    let query = self.query.iter().map(|(name, value)| format!("{name}={value}")).join("&");
    format!("{}?{query}", self.url)
  }
}

impl fmt::Display for HttpRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{REQUEST_SEPARATOR}")?;
    if let Some(name) = &self.name {
      writeln!(f, "# @name {name}")?;
    }
    if let Some(summary) = &self.summary {
      for line in summary.lines() {
        writeln!(f, "# {line}")?;
      }
    }
    writeln!(f)?;

    writeln!(f, "{} {}", self.method, self.target())?;
    for (name, value) in &self.headers {
      writeln!(f, "{name}: {value}")?;
    }

    if let Some(body) = &self.body {
      writeln!(f)?;
      writeln!(f, "{body}")?;
    }
    Ok(())
  }
}
