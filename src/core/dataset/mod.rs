mod classes;
mod dataset;
mod label;

pub use classes::ClassList;
pub use dataset::{Dataset, DatasetSplit, Sample, CLASSES_FILE, IMAGES_DIR, LABELS_DIR};
pub use label::{parse_label_file, YoloDetection};
