/*!
 * Memory Module
 * Partitioned memory simulation: block list, placement, compaction
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::{BlockList, MemorySimulator, SharedSimulator};
pub use traits::*;
pub use types::*;
