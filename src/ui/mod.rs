pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, info, section, success, warn};
pub use table::{seed_summary_table, stats_table};
pub use theme::{theme, Theme};
