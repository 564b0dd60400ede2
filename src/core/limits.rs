/*!
 * Simulator Limits and Constants
 *
 * Centralized location for the simulator's limits, thresholds, and magic numbers.
 * Values are grouped by domain.
 */

// =============================================================================
// MEMORY
// =============================================================================

/// Default simulated memory size (64MB)
/// Used as the capacity when no configuration overrides it
pub const DEFAULT_MEMORY_SIZE: usize = 64;

/// Upper bound accepted from configuration (1TB expressed in MB)
pub const MAX_MEMORY_SIZE: usize = 1024 * 1024;

/// Longest owner label stored on a block, in characters
/// Longer names are truncated at a character boundary
pub const MAX_PROCESS_NAME: usize = 19;

// =============================================================================
// FRAGMENTATION MODEL
// =============================================================================

/// Assumed fraction of an occupied fixed partition that its process uses
/// Simulation convention: processes are not sized individually in fixed mode
pub const ASSUMED_UTILIZATION: f64 = 0.7;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

/// Usage ratio at which pressure is reported as high
pub const HIGH_PRESSURE_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as critical
pub const CRITICAL_PRESSURE_THRESHOLD: f64 = 0.95;

// =============================================================================
// RENDERING
// =============================================================================

/// Width of the proportional memory bar, in characters
pub const MAP_BAR_WIDTH: usize = 50;
