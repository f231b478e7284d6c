pub mod document;
pub mod operation;
pub mod schema;

pub use document::{Components, Contact, Info, License, SecurityRequirement, Server, SpecDocument};
pub use operation::{HttpMethod, Operation, Parameter, ParameterLocation, RequestBody, Response};
pub use schema::{SchemaField, SchemaType, schema_fields};
