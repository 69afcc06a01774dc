use std::{collections::HashSet, fmt};

use http::Method;
use oas3::spec::{ObjectOrReference, ObjectSchema, Operation, Parameter, ParameterIn, PathItem};

use crate::{
  generator::{document::ApiDocument, operation_registry::declared_operations},
  utils::refs::ref_path,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
  #[error("unsupported OpenAPI version '{0}' (expected 3.x)")]
  UnsupportedVersion(String),
  #[error("path '{0}' must start with '/'")]
  InvalidPath(String),
  #[error("{method} {path}: path parameter '{name}' is not declared")]
  MissingPathParameter { method: Method, path: String, name: String },
  #[error("{method} {path}: path parameter '{name}' must be required")]
  OptionalPathParameter { method: Method, path: String, name: String },
  #[error("{location}: unresolved reference '{ref_path}'")]
  UnresolvedReference { location: String, ref_path: String },
  #[error("security requirement references undefined scheme '{0}'")]
  UndefinedSecurityScheme(String),
}

/// Every issue found while validating a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
  issues: Vec<ValidationIssue>,
}

impl ValidationReport {
  #[must_use]
  pub fn issues(&self) -> &[ValidationIssue] {
    &self.issues
  }

  fn push(&mut self, issue: ValidationIssue) {
    self.issues.push(issue);
  }
}

impl fmt::Display for ValidationReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} validation issue(s)", self.issues.len())?;
    for issue in &self.issues {
      write!(f, "\n  - {issue}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationReport {}

/// Checks the structural rules rendering relies on. Collects all issues before failing.
pub fn validate(document: &ApiDocument) -> Result<(), ValidationReport> {
  let mut validator = Validator {
    document,
    report: ValidationReport::default(),
  };
  validator.run();

  if validator.report.issues().is_empty() {
    Ok(())
  } else {
    Err(validator.report)
  }
}

struct Validator<'a> {
  document: &'a ApiDocument,
  report: ValidationReport,
}

impl Validator<'_> {
  fn run(&mut self) {
    let document = self.document;
    let spec = document.spec();
    if !spec.openapi.starts_with("3.") {
      self.report.push(ValidationIssue::UnsupportedVersion(spec.openapi.clone()));
    }

    for (path, item) in spec.paths.iter().flatten() {
      if !path.starts_with('/') {
        self.report.push(ValidationIssue::InvalidPath(path.clone()));
      }
      for (method, operation) in declared_operations(item) {
        self.check_operation(path, &method, item, operation);
      }
    }

    self.check_security();
  }

  fn check_operation(&mut self, path: &str, method: &Method, item: &PathItem, operation: &Operation) {
    let location = format!("{method} {path}");
    let parameters = item
      .parameters
      .iter()
      .chain(&operation.parameters)
      .filter_map(|param_ref| self.resolve_parameter(param_ref, &location))
      .collect::<Vec<_>>();

    let mut declared = HashSet::new();
    for param in parameters.iter().filter(|p| matches!(p.location, ParameterIn::Path)) {
      declared.insert(param.name.as_str());
      if param.required != Some(true) {
        self.report.push(ValidationIssue::OptionalPathParameter {
          method: method.clone(),
          path: path.to_string(),
          name: param.name.clone(),
        });
      }
    }

    for name in path_template_names(path) {
      if !declared.contains(name) {
        self.report.push(ValidationIssue::MissingPathParameter {
          method: method.clone(),
          path: path.to_string(),
          name: name.to_string(),
        });
      }
    }

    for param in &parameters {
      if let Some(schema_ref) = &param.schema {
        self.check_schema_ref(schema_ref, &format!("{location} parameter '{}'", param.name));
      }
    }

    if let Some(body_ref) = &operation.request_body {
      match body_ref.resolve(self.document.spec()) {
        Ok(body) => {
          for (content_type, media_type) in &body.content {
            if let Some(schema_ref) = &media_type.schema {
              self.check_schema_ref(schema_ref, &format!("{location} request body '{content_type}'"));
            }
          }
        }
        Err(_) => self.unresolved(body_ref, &format!("{location} request body")),
      }
    }
  }

  fn resolve_parameter(&mut self, param_ref: &ObjectOrReference<Parameter>, location: &str) -> Option<Parameter> {
    match param_ref.resolve(self.document.spec()) {
      Ok(param) => Some(param),
      Err(_) => {
        self.unresolved(param_ref, &format!("{location} parameter"));
        None
      }
    }
  }

  fn check_schema_ref(&mut self, schema_ref: &ObjectOrReference<ObjectSchema>, location: &str) {
    if schema_ref.resolve(self.document.spec()).is_err() {
      self.unresolved(schema_ref, location);
    }
  }

  fn unresolved<T>(&mut self, obj_ref: &ObjectOrReference<T>, location: &str) {
    self.report.push(ValidationIssue::UnresolvedReference {
      location: location.to_string(),
      ref_path: ref_path(obj_ref).unwrap_or_default().to_string(),
    });
  }

  fn check_security(&mut self) {
    let document = self.document;
    let security = document.security();
    let mut reported = HashSet::new();
    for requirement in security.all_requirements() {
      for name in requirement.keys() {
        if security.scheme(name).is_none() && reported.insert(name.clone()) {
          self.report.push(ValidationIssue::UndefinedSecurityScheme(name.clone()));
        }
      }
    }
  }
}

/// Returns the `{name}` tokens of a path template, in order.
pub fn path_template_names(path: &str) -> Vec<&str> {
  let mut names = Vec::new();
  for (start, _) in path.match_indices('{') {
    if let Some(len) = path[start..].find('}') {
      let name = &path[start + 1..start + len];
      if !name.is_empty() {
        names.push(name);
      }
    }
  }
  names
}
