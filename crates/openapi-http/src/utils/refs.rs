use oas3::spec::ObjectOrReference;

const COMPONENTS_PREFIX: &str = "#/components/";

/// Extracts the component name from an internal `$ref` of the given component kind.
///
/// Returns `None` for external references and for references to a different
/// component kind.
///
/// # Example
/// ```text
/// ("#/components/securitySchemes/bearerAuth", "securitySchemes") => Some("bearerAuth")
/// ("#/components/schemas/User", "securitySchemes")                => None
/// ("other.yaml#/components/schemas/User", "schemas")              => None
/// ```
pub fn component_ref_name<'a>(ref_path: &'a str, kind: &str) -> Option<&'a str> {
  ref_path
    .strip_prefix(COMPONENTS_PREFIX)?
    .strip_prefix(kind)?
    .strip_prefix('/')
    .filter(|name| !name.is_empty())
}

/// Returns the `$ref` path of an [`ObjectOrReference`], or `None` for inline objects.
pub fn ref_path<T>(obj_ref: &ObjectOrReference<T>) -> Option<&str> {
  match obj_ref {
    ObjectOrReference::Ref { ref_path, .. } => Some(ref_path),
    ObjectOrReference::Object(_) => None,
  }
}
