mod replicating_store;
mod stored_object;

pub use replicating_store::ReplicatingStore;
pub use stored_object::StoredObject;
