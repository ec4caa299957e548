use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct YoloDetection {
    pub class_id: u32,
    pub x_center: f32,
    pub y_center: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct LabelInfo {
    pub detections: Vec<YoloDetection>,
}

impl LabelInfo {
    pub fn is_background(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Parse a YOLO format label file.
///
/// # Returns
/// * `Some(LabelInfo)` if the file exists and can be read
/// * `None` if the file doesn't exist or cannot be read
pub fn parse_label_file(label_path: &Path) -> Option<LabelInfo> {
    let content = fs::read_to_string(label_path).ok()?;
    Some(parse_label_str(&content))
}

/// One detection per line: `class_id x_center y_center width height`.
/// Comment lines (`#`) and lines that don't parse are skipped.
pub fn parse_label_str(content: &str) -> LabelInfo {
    let mut detections = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();
        if values.len() != 5 {
            continue;
        }
        if let (Ok(class_id), Ok(x), Ok(y), Ok(w), Ok(h)) = (
            values[0].parse::<u32>(),
            values[1].parse::<f32>(),
            values[2].parse::<f32>(),
            values[3].parse::<f32>(),
            values[4].parse::<f32>(),
        ) {
            detections.push(YoloDetection {
                class_id,
                x_center: x,
                y_center: y,
                width: w,
                height: h,
            });
        }
    }

    LabelInfo { detections }
}
