/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::{RawAmount, Size};

/// Process placement interface
pub trait Allocator: Send + Sync {
    /// Load a named process of `size` MB
    fn allocate(&mut self, name: &str, size: RawAmount) -> MemoryResult<Placement>;

    /// Free the block held by a named process, returning the MB released
    fn deallocate(&mut self, name: &str) -> MemoryResult<Size>;

    /// Check if a process is currently loaded
    fn is_loaded(&self, name: &str) -> bool;

    /// Get a copy of the block held by a process
    fn block_of(&self, name: &str) -> Option<Block>;
}

/// Memory statistics provider
pub trait MemoryInfo: Send + Sync {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get an owned copy of the block list in address order
    fn snapshot(&self) -> Vec<Block>;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}

/// Fragmentation reporting and compaction
pub trait Compaction: Send + Sync {
    /// Get internal/external fragmentation totals
    fn analyze_fragmentation(&self) -> FragmentationReport;

    /// Slide occupied blocks together behind a single free block
    fn compact(&mut self) -> MemoryResult<()>;
}

/// Memory manager trait combining all interfaces
pub trait MemoryManager: Allocator + MemoryInfo + Compaction {}

/// Implement MemoryManager for types that implement all required traits
impl<T> MemoryManager for T where T: Allocator + MemoryInfo + Compaction {}
