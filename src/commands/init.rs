//! `overseer init` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::store::TaskStore;

/// Execute the `init` command.
///
/// # Errors
///
/// Returns an error string if the `.overseer/` files cannot be written.
pub fn run(ctx: &ServiceContext, root: &Path) -> Result<(), String> {
    let store = TaskStore::new(ctx, root);
    if store.is_initialized() {
        println!("Overseer already initialized in this directory.");
        return Ok(());
    }
    store.initialize()?;
    println!("Initialized Overseer in {}", store.data_dir().display());
    Ok(())
}
