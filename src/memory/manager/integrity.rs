/*!
 * Integrity Checks
 * Verification of block-list invariants and memory accounting
 */

use super::super::types::{MemoryError, MemoryResult};
use super::MemorySimulator;
use log::error;

impl MemorySimulator {
    /// Verify the block list and the available-memory accounting
    ///
    /// Checks contiguity from address 0, full coverage of the addressable
    /// range, owner bookkeeping, unique process names, coalescing in dynamic
    /// mode, the unchanged layout in fixed mode, and that available memory
    /// equals total minus the occupied sizes.
    pub fn verify_integrity(&self) -> MemoryResult<()> {
        let addressable = self.scheme.addressable(self.total_memory);
        self.blocks
            .verify(self.scheme, addressable)
            .inspect_err(|err| error!("{}", err))?;

        let occupied = self.blocks.occupied_size();
        if occupied > self.total_memory || self.available_memory != self.total_memory - occupied {
            let reason = format!(
                "available memory is {} MB but {} MB of {} MB are occupied",
                self.available_memory, occupied, self.total_memory
            );
            error!("Memory map corruption detected: {}", reason);
            return Err(MemoryError::CorruptionDetected(reason));
        }

        Ok(())
    }

    #[inline]
    pub(super) fn debug_verify(&self) {
        debug_assert!(
            self.verify_integrity().is_ok(),
            "memory map invariants violated: {:?}",
            self.verify_integrity()
        );
    }
}
