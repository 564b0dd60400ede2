/*!
 * Partition Management
 * Establishing fixed or dynamic partitioning over the address space
 */

use super::super::types::{BlockStatus, MemoryError, MemoryResult, PartitionMode, PartitionScheme};
use super::{BlockList, MemorySimulator};
use crate::core::types::{RawAmount, Size};
use log::{info, warn};

impl MemorySimulator {
    /// Reset the block list for `mode`, unloading every process
    ///
    /// `partition_count` is required for fixed mode and ignored for dynamic
    /// mode. Validation happens before anything is discarded, so a rejected
    /// configuration keeps the current layout and its processes.
    pub fn establish(
        &mut self,
        mode: PartitionMode,
        partition_count: Option<RawAmount>,
    ) -> MemoryResult<()> {
        match mode {
            PartitionMode::Fixed => {
                let count = partition_count.unwrap_or(0);
                let partitions = self.validate_partition_count(count)?;
                self.establish_fixed(partitions);
            }
            PartitionMode::Dynamic => self.establish_dynamic(),
        }
        self.debug_verify();
        Ok(())
    }

    fn validate_partition_count(&self, count: RawAmount) -> MemoryResult<usize> {
        usize::try_from(count)
            .ok()
            .filter(|&partitions| partitions >= 1 && partitions <= self.total_memory)
            .ok_or_else(|| {
                warn!(
                    "Rejected fixed partitioning with {} partitions over {} MB",
                    count, self.total_memory
                );
                MemoryError::InvalidConfiguration {
                    count,
                    total: self.total_memory,
                }
            })
    }

    fn establish_fixed(&mut self, partitions: usize) {
        let partition_size: Size = self.total_memory / partitions;
        let unaddressed = self.total_memory - partitions * partition_size;
        let unloaded = self.blocks.count_by_status(BlockStatus::Occupied);

        self.blocks = BlockList::partitioned(partitions, partition_size);
        self.scheme = PartitionScheme::Fixed {
            partitions,
            partition_size,
        };
        self.available_memory = self.total_memory;

        info!(
            "Fixed partition mode established: {} partitions of {} MB ({} MB unaddressed, {} processes unloaded)",
            partitions, partition_size, unaddressed, unloaded
        );
    }

    fn establish_dynamic(&mut self) {
        let unloaded = self.blocks.count_by_status(BlockStatus::Occupied);

        self.blocks = BlockList::single(self.total_memory);
        self.scheme = PartitionScheme::Dynamic;
        self.available_memory = self.total_memory;

        info!(
            "Dynamic partition mode established over {} MB ({} processes unloaded)",
            self.total_memory, unloaded
        );
    }
}
