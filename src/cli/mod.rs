/*!
 * Command-Line Interface
 * Interactive menu and console rendering over the simulator
 */

pub mod menu;
pub mod render;

pub use menu::Menu;
pub use render::{render_bar, render_fragmentation, render_json, render_memory_map, render_table};
