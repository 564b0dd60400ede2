/*!
 * Data Structures
 *
 * Specialized data structures for simulator state:
 * - Bounded process names stored inline without heap allocation
 */

mod process_name;

pub use process_name::ProcessName;
