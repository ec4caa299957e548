mod integrity;
mod split_stats;

pub use integrity::check_integrity;
pub use split_stats::analyze_split;
