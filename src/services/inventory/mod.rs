pub mod interface;
pub mod memory;
pub mod mongo;

pub use interface::{InventoryStore, StoreError};
pub use memory::MemoryInventory;
pub use mongo::MongoInventory;
