mod splitter;

pub use splitter::{split_dataset, SplitOptions};
