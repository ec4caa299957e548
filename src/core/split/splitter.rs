//! Train/test splitting of a YOLO source dataset.
//!
//! Reads `<source>/images`, `<source>/labels` and `<source>/classes.txt`
//! and rebuilds `<source>-split` from scratch with `train/` and `test/`
//! subsets.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::dataset::{
    ClassList, Dataset, DatasetSplit, Sample, CLASSES_FILE, IMAGES_DIR, LABELS_DIR,
};
use crate::core::operations::{copy_file, create_dir, reset_directory, FileOpError};

pub type SplitResult<T> = Result<T, SplitError>;

#[derive(Debug)]
pub enum SplitError {
    MissingClassList(PathBuf),
    MissingImagesDir(PathBuf),
    InvalidRatio(f64),
    FileOp(FileOpError),
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::MissingClassList(path) => write!(
                f,
                "classes.txt file not found! Please create a classes.txt labelmap at {:?}",
                path
            ),
            SplitError::MissingImagesDir(path) => {
                write!(f, "Images directory not found: {:?}", path)
            }
            SplitError::InvalidRatio(r) => {
                write!(f, "Train ratio must be between 0.0 and 1.0, got {}", r)
            }
            SplitError::FileOp(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SplitError::FileOp(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FileOpError> for SplitError {
    fn from(error: FileOpError) -> Self {
        SplitError::FileOp(error)
    }
}

impl From<std::io::Error> for SplitError {
    fn from(error: std::io::Error) -> Self {
        SplitError::FileOp(FileOpError::IoError(error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Fraction of samples assigned to train, in `[0.0, 1.0]`
    pub train_ratio: f64,
    /// Shuffle seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            seed: None,
        }
    }
}

/// Assignment of samples to subsets, computed before touching the disk.
#[derive(Debug, Clone, Default)]
pub struct SplitPlan {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
}

impl SplitPlan {
    pub fn get(&self, split: DatasetSplit) -> &[Sample] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Test => &self.test,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubsetSummary {
    pub images: usize,
    pub labels: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub output_dir: PathBuf,
    pub train: SubsetSummary,
    pub test: SubsetSummary,
    pub orphan_labels: usize,
    pub class_count: usize,
}

impl SplitSummary {
    pub fn get(&self, split: DatasetSplit) -> &SubsetSummary {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Test => &self.test,
        }
    }

    pub fn print_summary(&self) {
        info!("=== Split Summary ===");
        info!("Output directory: {:?}", self.output_dir);
        info!("Classes: {}", self.class_count);
        for split in DatasetSplit::all() {
            let subset = self.get(split);
            info!(
                "{}: {} images, {} labels",
                split.as_str(),
                subset.images,
                subset.labels
            );
        }
        if self.orphan_labels > 0 {
            warn!(
                "Ignored {} annotation files with no matching image",
                self.orphan_labels
            );
        }
    }
}

/// `floor(total * train_ratio)`, never more than `total`
pub fn train_count(total: usize, train_ratio: f64) -> usize {
    ((total as f64 * train_ratio).floor() as usize).min(total)
}

/// Shuffle once and cut at the train boundary.
pub fn plan_split(mut samples: Vec<Sample>, train_ratio: f64, seed: Option<u64>) -> SplitPlan {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    samples.shuffle(&mut rng);

    let train_num = train_count(samples.len(), train_ratio);
    let test = samples.split_off(train_num);

    SplitPlan {
        train: samples,
        test,
    }
}

/// Sibling output directory `<source>-split`.
pub fn split_output_dir(source: &Path) -> std::io::Result<PathBuf> {
    let source = match source.file_name() {
        Some(_) => source.to_path_buf(),
        // "." or ".." have no file name of their own
        None => source.canonicalize()?,
    };
    let mut name = source
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push("-split");
    Ok(source.with_file_name(name))
}

/// Split `source` into `<source>-split/{train,test}`.
///
/// Fails before touching the destination when `classes.txt` or `images/`
/// is missing. Otherwise the previous output is deleted and rebuilt.
pub fn split_dataset(source: &Path, options: &SplitOptions) -> SplitResult<SplitSummary> {
    if !(0.0..=1.0).contains(&options.train_ratio) {
        return Err(SplitError::InvalidRatio(options.train_ratio));
    }

    let images_dir = source.join(IMAGES_DIR);
    if !images_dir.is_dir() {
        return Err(SplitError::MissingImagesDir(images_dir));
    }
    let classes_path = source.join(CLASSES_FILE);
    if !classes_path.is_file() {
        return Err(SplitError::MissingClassList(classes_path));
    }

    let dataset = Dataset::scan(source)?;
    if dataset.is_empty() {
        warn!("No images found in {:?}; both subsets will be empty", images_dir);
    }
    let orphan_labels = dataset.orphan_labels().len();
    if orphan_labels > 0 {
        warn!(
            "{} annotation files in {:?} have no matching image and will not be copied",
            orphan_labels,
            source.join(LABELS_DIR)
        );
    }

    // Read before the destination is touched; only used for the summary
    let class_count = match ClassList::read(&classes_path) {
        Ok(classes) => classes.len(),
        Err(e) => {
            warn!("Could not read {:?}: {}", classes_path, e);
            0
        }
    };

    let output_dir = split_output_dir(source)?;
    info!("Writing split to {:?}", output_dir);
    reset_directory(&output_dir)?;
    for split in DatasetSplit::all() {
        create_dir(&split.images_dir(&output_dir))?;
        create_dir(&split.labels_dir(&output_dir))?;
    }

    copy_file(&classes_path, &output_dir.join(CLASSES_FILE))?;

    let plan = plan_split(dataset.into_samples(), options.train_ratio, options.seed);
    info!("Images moving to train: {}", plan.train.len());
    info!("Images moving to test: {}", plan.test.len());

    let train = copy_subset(plan.get(DatasetSplit::Train), DatasetSplit::Train, &output_dir)?;
    let test = copy_subset(plan.get(DatasetSplit::Test), DatasetSplit::Test, &output_dir)?;

    Ok(SplitSummary {
        output_dir,
        train,
        test,
        orphan_labels,
        class_count,
    })
}

fn copy_subset(
    samples: &[Sample],
    split: DatasetSplit,
    output_dir: &Path,
) -> SplitResult<SubsetSummary> {
    let images_dir = split.images_dir(output_dir);
    let labels_dir = split.labels_dir(output_dir);
    let mut summary = SubsetSummary::default();

    for sample in samples {
        let Some(file_name) = sample.image_path.file_name() else {
            continue;
        };
        let dest_image = images_dir.join(file_name);
        // Counts reflect files on disk, so an overwrite is not counted twice
        if dest_image.exists() {
            warn!(
                "{:?} collides with an image already in {}; overwriting",
                file_name,
                split.as_str()
            );
        } else {
            summary.images += 1;
        }
        copy_file(&sample.image_path, &dest_image)?;

        if let Some(label_path) = &sample.label_path {
            if let Some(label_name) = label_path.file_name() {
                let dest_label = labels_dir.join(label_name);
                if !dest_label.exists() {
                    summary.labels += 1;
                }
                copy_file(label_path, &dest_label)?;
            }
        }
    }

    Ok(summary)
}
