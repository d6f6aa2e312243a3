mod in_memory;
mod object_store_adapter;

pub use in_memory::InMemoryBackend;
pub use object_store_adapter::ObjectStoreBackend;
