pub mod policy;

pub use policy::AccessDenied;
pub use policy::AccessPolicy;
pub use policy::Requirement;
pub use policy::RouteRule;
