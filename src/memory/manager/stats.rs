/*!
 * Memory Statistics
 * Usage totals and pressure reporting
 */

use super::super::types::{BlockStatus, MemoryPressure, MemoryStats};
use super::MemorySimulator;
use crate::core::types::Size;

impl MemorySimulator {
    /// Get memory statistics
    pub fn stats(&self) -> MemoryStats {
        let used = self.used_memory();
        MemoryStats {
            mode: self.mode(),
            total_memory: self.total_memory,
            used_memory: used,
            available_memory: self.available_memory,
            usage_percentage: (used as f64 / self.total_memory as f64) * 100.0,
            occupied_blocks: self.blocks.count_by_status(BlockStatus::Occupied),
            free_blocks: self.blocks.count_by_status(BlockStatus::Free),
            largest_free_block: self.blocks.largest_free(),
        }
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        (self.total_memory, self.used_memory(), self.available_memory)
    }

    /// Current memory pressure level
    pub fn pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.used_memory() as f64 / self.total_memory as f64)
    }
}
