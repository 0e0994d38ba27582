pub mod output;
pub mod table;
pub mod theme;

pub use output::{banner, info, section, success, Icons};
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
