/*!
 * Memory Deallocator Implementation
 * Freeing named processes and coalescing free neighbours
 */

use super::super::types::{MemoryError, MemoryResult};
use super::MemorySimulator;
use crate::core::types::Size;
use crate::core::ProcessName;
use log::{info, warn};

impl MemorySimulator {
    /// Free the block occupied by `name` and return the MB released
    ///
    /// Fixed partitions keep their shape. In dynamic mode the freed block
    /// absorbs a free successor and is then absorbed by a free predecessor,
    /// leaving a single free block over the whole hole.
    pub fn deallocate(&mut self, name: &str) -> MemoryResult<Size> {
        let name = ProcessName::new(name);

        let Some(index) = self.blocks.position_of(&name) else {
            warn!("Attempted to free process '{}' which is not loaded", name);
            return Err(MemoryError::NotFound(name));
        };

        let released = self.blocks.release(index);
        self.available_memory += released;

        let hole = if self.scheme.is_dynamic() {
            let merged = self.blocks.coalesce_at(index);
            self.blocks.as_slice()[merged].size
        } else {
            released
        };

        info!(
            "Freed process '{}': {} MB released ({} MB free hole, {} MB now available)",
            name, released, hole, self.available_memory
        );
        self.debug_verify();

        Ok(released)
    }
}
