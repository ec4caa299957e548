mod file_ops;

pub use file_ops::{
    copy_file, create_dir, label_path_for_image, reset_directory, FileOpError, FileOpResult,
};
