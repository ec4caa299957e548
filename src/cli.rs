use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Split a YOLO dataset (images/, labels/, classes.txt) into train and test subsets.
#[derive(Parser, Debug)]
#[command(name = "yolo-split", version, long_about = None)]
pub struct Cli {
    /// Also write logs to a timestamped file in this directory
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Settings file to use instead of the platform config location
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Split DATA_DIR into DATA_DIR-split/{train,test}, replacing any previous output
    Split {
        /// Directory containing images/, labels/ and classes.txt
        data_dir: PathBuf,

        /// Fraction of images assigned to train [default: from settings, else 0.8]
        #[arg(long = "train-ratio", value_parser = validate_ratio)]
        train_ratio: Option<f64>,

        /// Seed for a reproducible shuffle
        #[arg(long = "seed")]
        seed: Option<u64>,
    },

    /// Report images without labels and labels without images
    Check {
        /// Directory containing images/, labels/ and classes.txt
        data_dir: PathBuf,
    },

    /// Report per-subset counts of a split output directory
    Stats {
        /// Output of a previous split (contains train/ and test/)
        split_dir: PathBuf,
    },

    /// Update and save the default settings (also persists --log-dir)
    Config {
        /// Default train fraction
        #[arg(long = "train-ratio", value_parser = validate_ratio)]
        train_ratio: Option<f64>,

        /// Default shuffle seed
        #[arg(long = "seed", conflicts_with = "clear_seed")]
        seed: Option<u64>,

        /// Forget the default seed and shuffle from entropy
        #[arg(long = "clear-seed")]
        clear_seed: bool,
    },
}

// Validate that the ratio is between 0.0 and 1.0
fn validate_ratio(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("RATIO must be between 0.0 and 1.0".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_ratio() {
        assert_eq!(validate_ratio("0.8"), Ok(0.8));
        assert!(validate_ratio("1.0").is_ok());
        assert!(validate_ratio("0.0").is_ok());
        assert!(validate_ratio("-0.1").is_err());
        assert!(validate_ratio("1.1").is_err());
        assert!(validate_ratio("abc").is_err());
        assert!(validate_ratio("NaN").is_err());
    }

    #[test]
    fn test_parse_split() {
        let cli = Cli::try_parse_from([
            "yolo-split",
            "split",
            "data/coco_data",
            "--train-ratio",
            "0.7",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Split {
                data_dir: PathBuf::from("data/coco_data"),
                train_ratio: Some(0.7),
                seed: Some(42),
            }
        );
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["yolo-split", "stats", "out", "--log-dir", "logs"]).unwrap();
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_parse_rejects_bad_ratio() {
        assert!(Cli::try_parse_from(["yolo-split", "split", "data", "--train-ratio", "2"]).is_err());
    }

    #[test]
    fn test_config_seed_conflicts_with_clear() {
        assert!(
            Cli::try_parse_from(["yolo-split", "config", "--seed", "1", "--clear-seed"]).is_err()
        );
    }
}
