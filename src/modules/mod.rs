pub mod books;

use bookshelf_kernel::ModuleRegistry;

use books::store::SharedStore;

/// Register every module with the registry
pub fn register_all(registry: &mut ModuleRegistry, books: SharedStore) {
    registry.register(books::create_module(books));
}
