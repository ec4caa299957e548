use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::operations::{label_path_for_image, FileOpResult};

pub const IMAGES_DIR: &str = "images";
pub const LABELS_DIR: &str = "labels";
pub const CLASSES_FILE: &str = "classes.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Test,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
        }
    }

    pub fn all() -> [DatasetSplit; 2] {
        [DatasetSplit::Train, DatasetSplit::Test]
    }

    pub fn images_dir(&self, split_root: &Path) -> PathBuf {
        split_root.join(self.as_str()).join(IMAGES_DIR)
    }

    pub fn labels_dir(&self, split_root: &Path) -> PathBuf {
        split_root.join(self.as_str()).join(LABELS_DIR)
    }
}

/// An image and the annotation file sharing its stem, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub image_path: PathBuf,
    pub label_path: Option<PathBuf>,
}

impl Sample {
    pub fn has_label(&self) -> bool {
        self.label_path.is_some()
    }
}

/// Every sample found under a source directory's `images/` folder, plus the
/// annotation files in `labels/` that matched no image.
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
    orphan_labels: Vec<PathBuf>,
}

impl Dataset {
    /// Walk `<root>/images` recursively and pair each file with
    /// `<root>/labels/<stem>.txt`. A missing `labels/` folder means no
    /// image has an annotation. Samples come back sorted by image path.
    pub fn scan(root: &Path) -> FileOpResult<Self> {
        let images_dir = root.join(IMAGES_DIR);
        let labels_dir = root.join(LABELS_DIR);

        let mut samples = Vec::new();
        let mut image_stems = HashSet::new();

        for entry in WalkDir::new(&images_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let image_path = entry.into_path();
            let label_path =
                label_path_for_image(&labels_dir, &image_path).filter(|p| p.is_file());

            if let Some(stem) = image_path.file_stem() {
                image_stems.insert(stem.to_os_string());
            }
            samples.push(Sample {
                image_path,
                label_path,
            });
        }

        let mut label_count = 0;
        let mut orphan_labels = Vec::new();
        if labels_dir.is_dir() {
            for entry in WalkDir::new(&labels_dir).max_depth(1).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                label_count += 1;
                let path = entry.into_path();
                let is_txt = path.extension().is_some_and(|ext| ext == "txt");
                let matched = path
                    .file_stem()
                    .is_some_and(|stem| image_stems.contains(stem));
                if !(is_txt && matched) {
                    debug!("Label without image: {:?}", path);
                    orphan_labels.push(path);
                }
            }
        }

        info!("Number of image files: {}", samples.len());
        info!("Number of annotation files: {}", label_count);

        Ok(Self {
            samples,
            orphan_labels,
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub fn orphan_labels(&self) -> &[PathBuf] {
        &self.orphan_labels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_split_paths() {
        let root = Path::new("out");
        assert_eq!(
            DatasetSplit::Train.images_dir(root),
            PathBuf::from("out/train/images")
        );
        assert_eq!(
            DatasetSplit::Test.labels_dir(root),
            PathBuf::from("out/test/labels")
        );
    }

    #[test]
    fn test_scan_pairs_labels_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("images/a.jpg"));
        touch(&root.join("images/b.png"));
        touch(&root.join("labels/a.txt"));

        let dataset = Dataset::scan(root).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.samples()[0].label_path,
            Some(root.join("labels/a.txt"))
        );
        assert!(!dataset.samples()[1].has_label());
        assert!(dataset.orphan_labels().is_empty());
    }

    #[test]
    fn test_scan_recurses_into_image_subfolders() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("images/day/a.jpg"));
        touch(&root.join("images/night/b.jpg"));
        touch(&root.join("labels/b.txt"));

        let dataset = Dataset::scan(root).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.samples().iter().filter(|s| s.has_label()).count(), 1);
    }

    #[test]
    fn test_scan_collects_orphan_labels() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("images/a.jpg"));
        touch(&root.join("labels/a.txt"));
        touch(&root.join("labels/ghost.txt"));

        let dataset = Dataset::scan(root).unwrap();

        assert_eq!(dataset.orphan_labels(), &[root.join("labels/ghost.txt")]);
    }

    #[test]
    fn test_scan_without_labels_dir() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("images/a.jpg"));

        let dataset = Dataset::scan(dir.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert!(!dataset.samples()[0].has_label());
    }

    #[test]
    fn test_scan_empty_images_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();

        let dataset = Dataset::scan(dir.path()).unwrap();

        assert!(dataset.is_empty());
    }
}
