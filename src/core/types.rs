/*!
 * Core Types
 * Common types used across the simulator
 */

/// Address type for the simulated address space (MB offset from 0)
pub type Address = usize;

/// Size type for block and memory sizes (MB)
pub type Size = usize;

/// Block identifier, unique within one block-list generation
pub type BlockId = usize;

/// Raw size or count as entered by a caller, before validation.
/// Signed so that zero and negative requests can be rejected explicitly.
pub type RawAmount = i64;
