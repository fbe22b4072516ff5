pub mod id;
pub mod in_memory;
