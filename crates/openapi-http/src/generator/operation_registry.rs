use std::fmt;

use http::Method;
use itertools::Itertools;
use oas3::spec::{Operation, PathItem};

use crate::generator::document::ApiDocument;

/// Methods that are listed and rendered, in output order.
pub const RENDERED_METHODS: [Method; 7] = [
  Method::GET,
  Method::POST,
  Method::PUT,
  Method::DELETE,
  Method::PATCH,
  Method::HEAD,
  Method::OPTIONS,
];

/// Operations declared on a path item, each method at most once.
///
/// `PathItem::methods` can yield the same method more than once.
pub fn declared_operations(item: &PathItem) -> impl Iterator<Item = (Method, &Operation)> {
  item.methods().into_iter().unique_by(|(method, _)| method.clone())
}

/// One HTTP method bound to one path.
///
/// The owning [`PathItem`] is kept so path-level parameters stay reachable.
#[derive(Debug, Clone)]
pub struct OperationRef<'a> {
  pub path: &'a str,
  pub method: Method,
  pub operation: &'a Operation,
  pub path_item: &'a PathItem,
}

impl OperationRef<'_> {
  #[must_use]
  pub fn operation_id(&self) -> Option<&str> {
    self.operation.operation_id.as_deref()
  }

  #[must_use]
  pub fn has_tag(&self, tag: &str) -> bool {
    self.operation.tags.iter().any(|t| t == tag)
  }
}

impl fmt::Display for OperationRef<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.method, self.path)?;
    if let Some(id) = self.operation_id() {
      write!(f, " ({id})")?;
    }
    Ok(())
  }
}

/// Selection criteria for operations. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFilter {
  pub operation_id: Option<String>,
  pub path: Option<String>,
  pub tag: Option<String>,
}

impl OperationFilter {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.operation_id.is_none() && self.path.is_none() && self.tag.is_none()
  }

  /// Returns whether the given operation passes this filter.
  #[must_use]
  pub fn accepts(&self, operation: &OperationRef<'_>) -> bool {
    if let Some(ref id) = self.operation_id
      && operation.operation_id() != Some(id.as_str())
    {
      return false;
    }

    if let Some(ref path) = self.path
      && operation.path != path.as_str()
    {
      return false;
    }

    if let Some(ref tag) = self.tag
      && !operation.has_tag(tag)
    {
      return false;
    }

    true
  }
}

impl fmt::Display for OperationFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let criteria = [
      ("operation id", &self.operation_id),
      ("path", &self.path),
      ("tag", &self.tag),
    ];
    let mut first = true;
    for (label, value) in criteria {
      let Some(value) = value else {
        continue;
      };
      if !first {
        write!(f, ", ")?;
      }
      write!(f, "{label} '{value}'")?;
      first = false;
    }
    if first {
      write!(f, "any operation")?;
    }
    Ok(())
  }
}

/// The flattened path table of a document.
///
/// Paths are in lexicographic order and methods in [`RENDERED_METHODS`] order.
#[derive(Debug, Clone)]
pub struct OperationRegistry<'a> {
  operations: Vec<OperationRef<'a>>,
  skipped: Vec<(&'a str, Method)>,
}

impl<'a> OperationRegistry<'a> {
  #[must_use]
  pub fn new(document: &'a ApiDocument) -> Self {
    let mut operations = Vec::new();
    let mut skipped = Vec::new();

    for (path, path_item) in document.spec().paths.iter().flatten() {
      let mut methods = Vec::new();
      for (method, operation) in declared_operations(path_item) {
        match RENDERED_METHODS.iter().position(|m| *m == method) {
          Some(rank) => methods.push((rank, method, operation)),
          None => skipped.push((path.as_str(), method)),
        }
      }
      methods.sort_by_key(|(rank, _, _)| *rank);

      operations.extend(methods.into_iter().map(|(_, method, operation)| OperationRef {
        path: path.as_str(),
        method,
        operation,
        path_item,
      }));
    }

    Self { operations, skipped }
  }

  /// Declared operations whose method is never rendered (TRACE).
  #[must_use]
  pub fn skipped(&self) -> &[(&'a str, Method)] {
    &self.skipped
  }

  /// Returns the operations accepted by `filter`, in registry order.
  #[must_use]
  pub fn find(&self, filter: &OperationFilter) -> Vec<OperationRef<'a>> {
    self.operations.iter().filter(|op| filter.accepts(op)).cloned().collect()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.operations.is_empty()
  }
}
