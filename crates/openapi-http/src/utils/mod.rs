pub mod refs;
pub mod schema_ext;
pub mod spec;
pub mod validate;

pub(crate) use schema_ext::SchemaExt;
