use std::fs;
use std::path::Path;

/// Ordered class names; a class id is an index into this list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    /// Invalid UTF-8 is replaced rather than rejected; the file itself is
    /// only ever copied byte for byte.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// One name per non-blank line, surrounding whitespace trimmed.
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name for a class id, or "Unknown" when out of range
    pub fn name(&self, class_id: u32) -> &str {
        self.names
            .get(class_id as usize)
            .map(String::as_str)
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let classes = ClassList::parse("bottle\n\n  candy  \n\t\ncoin\n");
        assert_eq!(classes.len(), 3);
        assert_eq!(classes.names(), &["bottle", "candy", "coin"]);
    }

    #[test]
    fn test_name_lookup() {
        let classes = ClassList::parse("bottle\ncandy\n");
        assert_eq!(classes.name(1), "candy");
        assert_eq!(classes.name(7), "Unknown");
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.txt");
        fs::write(&path, "cat\r\ndog\r\n").unwrap();

        let classes = ClassList::read(&path).unwrap();
        assert_eq!(classes.names(), &["cat", "dog"]);
    }

    #[test]
    fn test_read_latin1_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.txt");
        fs::write(&path, b"caf\xe9\ncoin\n").unwrap();

        let classes = ClassList::read(&path).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.name(1), "coin");
    }
}
