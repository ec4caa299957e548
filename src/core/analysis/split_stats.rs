use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::dataset::{
    parse_label_file, ClassList, DatasetSplit, YoloDetection, CLASSES_FILE,
};
use crate::core::operations::{label_path_for_image, FileOpResult};

/// Statistics for one subset of a split output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsetStats {
    pub total_images: usize,
    pub label_files: usize,
    /// Images with no label file or a label file with no detections
    pub background: usize,
    pub detections: usize,
    /// Boxes whose normalized coordinates fall outside `[0, 1]`
    pub out_of_bounds: usize,
    pub per_class: BTreeMap<u32, usize>,
}

impl SubsetStats {
    /// Get percentage of background images
    pub fn background_percentage(&self) -> f32 {
        if self.total_images == 0 {
            return 0.0;
        }
        (self.background as f32 / self.total_images as f32) * 100.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SplitStats {
    pub classes: ClassList,
    pub train: SubsetStats,
    pub test: SubsetStats,
}

impl SplitStats {
    pub fn get(&self, split: DatasetSplit) -> &SubsetStats {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Test => &self.test,
        }
    }

    pub fn total_images(&self) -> usize {
        self.train.total_images + self.test.total_images
    }

    /// Share of all images that landed in train
    pub fn train_fraction(&self) -> f32 {
        let total = self.total_images();
        if total == 0 {
            return 0.0;
        }
        self.train.total_images as f32 / total as f32
    }

    pub fn print_summary(&self) {
        info!("=== Split Statistics ===");
        info!(
            "Classes ({}): {}",
            self.classes.len(),
            self.classes.names().join(", ")
        );
        info!(
            "Total images: {} (train fraction {:.3})",
            self.total_images(),
            self.train_fraction()
        );
        for split in DatasetSplit::all() {
            let stats = self.get(split);
            info!(
                "{}: {} images, {} label files, {} background ({:.1}%), {} detections",
                split.as_str(),
                stats.total_images,
                stats.label_files,
                stats.background,
                stats.background_percentage(),
                stats.detections
            );
            for (class_id, count) in &stats.per_class {
                info!("    {} ({}): {}", self.classes.name(*class_id), class_id, count);
            }
            if stats.out_of_bounds > 0 {
                warn!(
                    "{}: {} boxes have coordinates outside [0, 1]",
                    split.as_str(),
                    stats.out_of_bounds
                );
            }
        }
    }
}

fn in_unit_range(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

fn is_out_of_bounds(detection: &YoloDetection) -> bool {
    ![
        detection.x_center,
        detection.y_center,
        detection.width,
        detection.height,
    ]
    .into_iter()
    .all(in_unit_range)
}

/// Analyze one subset of a split output
pub fn analyze_subset(split_root: &Path, split: DatasetSplit) -> FileOpResult<SubsetStats> {
    let images_path = split.images_dir(split_root);
    let labels_path = split.labels_dir(split_root);
    let mut stats = SubsetStats::default();

    info!("Analyzing split: {:?}", split.as_str());

    for entry in fs::read_dir(&images_path)? {
        let image_path = entry?.path();
        if !image_path.is_file() {
            continue;
        }
        stats.total_images += 1;

        let label =
            label_path_for_image(&labels_path, &image_path).and_then(|p| parse_label_file(&p));
        match label {
            Some(label_info) => {
                stats.label_files += 1;
                if label_info.is_background() {
                    stats.background += 1;
                }
                for detection in &label_info.detections {
                    stats.detections += 1;
                    *stats.per_class.entry(detection.class_id).or_insert(0) += 1;
                    if is_out_of_bounds(detection) {
                        stats.out_of_bounds += 1;
                    }
                }
            }
            None => stats.background += 1,
        }
    }

    Ok(stats)
}

/// Analyze both subsets of a split output directory. A missing
/// `classes.txt` only means class ids are reported without names.
pub fn analyze_split(split_root: &Path) -> FileOpResult<SplitStats> {
    let classes = match ClassList::read(&split_root.join(CLASSES_FILE)) {
        Ok(classes) => classes,
        Err(e) => {
            warn!("Could not read {}: {}", CLASSES_FILE, e);
            ClassList::default()
        }
    };

    Ok(SplitStats {
        classes,
        train: analyze_subset(split_root, DatasetSplit::Train)?,
        test: analyze_subset(split_root, DatasetSplit::Test)?,
    })
}
