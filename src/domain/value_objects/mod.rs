mod access_policy;
mod backend_id;
mod object_key;

pub use access_policy::AccessPolicy;
pub use backend_id::BackendId;
pub use object_key::{KeyConstraint, ObjectKey};
