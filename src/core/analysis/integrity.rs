use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::dataset::{Dataset, CLASSES_FILE, IMAGES_DIR, LABELS_DIR};
use crate::core::operations::{label_path_for_image, FileOpResult};

/// Types of integrity issues found in the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssueType {
    /// Image file exists but no corresponding label file
    ImageWithoutLabel,
    /// Label file exists but no corresponding image
    LabelWithoutImage,
}

impl IntegrityIssueType {
    pub fn as_str(&self) -> &str {
        match self {
            IntegrityIssueType::ImageWithoutLabel => "Image without label",
            IntegrityIssueType::LabelWithoutImage => "Label without image",
        }
    }
}

/// A single integrity issue
#[derive(Debug, Clone)]
pub struct IntegrityIssue {
    pub issue_type: IntegrityIssueType,
    /// The existing file path
    pub path: PathBuf,
    /// The missing counterpart path (for display purposes)
    pub expected_counterpart: PathBuf,
}

/// Statistics about dataset integrity issues
#[derive(Debug, Clone, Default)]
pub struct IntegrityStats {
    pub total_images: usize,
    pub has_class_list: bool,
    pub images_without_labels: Vec<IntegrityIssue>,
    pub labels_without_images: Vec<IntegrityIssue>,
}

impl IntegrityStats {
    /// Total count of all integrity issues
    pub fn total_issues(&self) -> usize {
        self.images_without_labels.len() + self.labels_without_images.len()
    }

    pub fn print_summary(&self) {
        info!("=== Integrity Report ===");
        info!("Images: {}", self.total_images);
        info!(
            "Images without labels (background): {}",
            self.images_without_labels.len()
        );
        for issue in &self.images_without_labels {
            debug!(
                "  {}: {:?} (expected {:?})",
                issue.issue_type.as_str(),
                issue.path,
                issue.expected_counterpart
            );
        }
        if self.labels_without_images.is_empty() {
            info!("Labels without images: 0");
        } else {
            warn!(
                "Labels without images: {} (ignored when splitting)",
                self.labels_without_images.len()
            );
            for issue in &self.labels_without_images {
                warn!(
                    "  {}: {:?} (expected {:?})",
                    issue.issue_type.as_str(),
                    issue.path,
                    issue.expected_counterpart
                );
            }
        }
        if !self.has_class_list {
            warn!("{} is missing; splitting will fail", CLASSES_FILE);
        }
        info!("Total issues: {}", self.total_issues());
    }
}

/// Pair up images and labels of a source dataset without modifying it.
pub fn check_integrity(source: &Path) -> FileOpResult<IntegrityStats> {
    let dataset = Dataset::scan(source)?;
    let images_dir = source.join(IMAGES_DIR);
    let labels_dir = source.join(LABELS_DIR);

    let images_without_labels = dataset
        .samples()
        .iter()
        .filter(|sample| !sample.has_label())
        .filter_map(|sample| {
            label_path_for_image(&labels_dir, &sample.image_path).map(|expected| IntegrityIssue {
                issue_type: IntegrityIssueType::ImageWithoutLabel,
                path: sample.image_path.clone(),
                expected_counterpart: expected,
            })
        })
        .collect();

    let labels_without_images = dataset
        .orphan_labels()
        .iter()
        .map(|label| IntegrityIssue {
            issue_type: IntegrityIssueType::LabelWithoutImage,
            path: label.clone(),
            expected_counterpart: images_dir.join(label.file_stem().unwrap_or_default()),
        })
        .collect();

    Ok(IntegrityStats {
        total_images: dataset.len(),
        has_class_list: source.join(CLASSES_FILE).is_file(),
        images_without_labels,
        labels_without_images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_integrity_reports_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("images")).unwrap();
        fs::create_dir_all(root.join("labels")).unwrap();
        fs::write(root.join("images/a.jpg"), b"a").unwrap();
        fs::write(root.join("images/b.jpg"), b"b").unwrap();
        fs::write(root.join("labels/a.txt"), "0 0.5 0.5 0.1 0.1\n").unwrap();
        fs::write(root.join("labels/orphan.txt"), "").unwrap();

        let stats = check_integrity(root).unwrap();

        assert_eq!(stats.total_images, 2);
        assert!(!stats.has_class_list);
        assert_eq!(stats.total_issues(), 2);
        assert_eq!(stats.images_without_labels[0].path, root.join("images/b.jpg"));
        assert_eq!(
            stats.images_without_labels[0].expected_counterpart,
            root.join("labels/b.txt")
        );
        assert_eq!(
            stats.labels_without_images[0].issue_type,
            IntegrityIssueType::LabelWithoutImage
        );
        assert_eq!(stats.labels_without_images[0].path, root.join("labels/orphan.txt"));
    }

    #[test]
    fn test_check_integrity_clean_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("images")).unwrap();
        fs::create_dir_all(root.join("labels")).unwrap();
        fs::write(root.join("classes.txt"), "cat\n").unwrap();
        fs::write(root.join("images/a.jpg"), b"a").unwrap();
        fs::write(root.join("labels/a.txt"), "0 0.5 0.5 0.1 0.1\n").unwrap();

        let stats = check_integrity(root).unwrap();

        assert!(stats.has_class_list);
        assert_eq!(stats.total_issues(), 0);
    }

    #[test]
    fn test_check_integrity_missing_images_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_integrity(dir.path()).is_err());
    }
}
