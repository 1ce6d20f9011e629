pub mod books;
pub mod borrowers;

use std::sync::Arc;

use libris_kernel::ModuleRegistry;
use libris_store::MemoryStore;

/// Register all domain modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<MemoryStore>) {
    registry.register(books::create_module(store.clone()));
    registry.register(borrowers::create_module(store));
}
