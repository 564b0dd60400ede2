/*!
 * Fragmentation Analysis
 * Internal and external fragmentation over the current block list
 */

use super::super::types::{FragmentationReport, PartitionScheme};
use super::MemorySimulator;
use crate::core::limits::ASSUMED_UTILIZATION;
use crate::core::types::Size;

/// Unused part of an occupied fixed partition under the utilization model
///
/// The used share is truncated per partition in double precision, so results
/// match the reference numbers exactly (a 90 MB partition wastes 28 MB, not 27).
#[inline]
pub(crate) fn partition_waste(partition_size: Size) -> Size {
    let used = (partition_size as f64 * ASSUMED_UTILIZATION) as Size;
    partition_size - used
}

impl MemorySimulator {
    /// Compute fragmentation totals in MB
    ///
    /// Fixed mode reports only internal fragmentation; dynamic mode reports
    /// only external fragmentation (every free block counts).
    pub fn analyze_fragmentation(&self) -> FragmentationReport {
        match self.scheme {
            PartitionScheme::Fixed { .. } => FragmentationReport {
                internal: self
                    .blocks
                    .iter()
                    .filter(|b| b.is_occupied())
                    .map(|b| partition_waste(b.size))
                    .sum(),
                external: 0,
            },
            PartitionScheme::Dynamic => FragmentationReport {
                internal: 0,
                external: self.blocks.free_size(),
            },
        }
    }
}
