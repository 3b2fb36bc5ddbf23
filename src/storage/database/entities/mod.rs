/// Per-domain job entity module
pub mod batch_domain;
/// Batch request entity module
pub mod batch_request;

pub use batch_domain::Entity as BatchDomain;
pub use batch_request::Entity as BatchRequest;
