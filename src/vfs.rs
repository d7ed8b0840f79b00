//! In-memory virtual file store.
//!
//! Files are plain name/content pairs kept in creation order, so listing is
//! deterministic. Nothing here touches the real filesystem.

use crate::error::ShellError;

/// A single named text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct FileStore {
    files: Vec<VirtualFile>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f.name == name)
    }

    /// Add an empty file. Fails if the name is taken; the existing file is left alone.
    pub fn create(&mut self, name: &str) -> Result<(), ShellError> {
        if self.position(name).is_some() {
            return Err(ShellError::FileExists(name.to_string()));
        }
        self.files.push(VirtualFile {
            name: name.to_string(),
            content: String::new(),
        });
        Ok(())
    }

    /// Replace the whole content of an existing file.
    pub fn write(&mut self, name: &str, content: &str) -> Result<(), ShellError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ShellError::FileNotFound(name.to_string()))?;
        self.files[idx].content = content.to_string();
        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<&str, ShellError> {
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.content.as_str())
            .ok_or_else(|| ShellError::FileNotFound(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Result<VirtualFile, ShellError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ShellError::FileNotFound(name.to_string()))?;
        Ok(self.files.remove(idx))
    }

    /// File names in creation order.
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_write_then_read_returns_content() {
        let mut fs = FileStore::new();
        fs.create("a.txt").unwrap();
        fs.write("a.txt", "hello world").unwrap();
        assert_eq!(fs.read("a.txt").unwrap(), "hello world");
    }

    #[test]
    fn test_new_file_is_empty() {
        let mut fs = FileStore::new();
        fs.create("empty").unwrap();
        assert_eq!(fs.read("empty").unwrap(), "");
    }

    #[test]
    fn test_write_replaces_instead_of_appending() {
        let mut fs = FileStore::new();
        fs.create("f").unwrap();
        fs.write("f", "first").unwrap();
        fs.write("f", "second").unwrap();
        assert_eq!(fs.read("f").unwrap(), "second");
    }

    #[test]
    fn test_duplicate_create_keeps_content() {
        let mut fs = FileStore::new();
        fs.create("f").unwrap();
        fs.write("f", "keep me").unwrap();

        let err = fs.create("f").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(fs.read("f").unwrap(), "keep me");
        assert_eq!(fs.len(), 1);
    }

    #[test]
    fn test_missing_file_operations_fail() {
        let mut fs = FileStore::new();
        assert_eq!(fs.read("nope").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fs.write("nope", "x").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fs.delete("nope").unwrap_err().kind(), ErrorKind::NotFound);
        assert!(fs.is_empty());
    }

    #[test]
    fn test_read_after_delete_is_not_found() {
        let mut fs = FileStore::new();
        fs.create("gone").unwrap();
        fs.delete("gone").unwrap();
        assert_eq!(
            fs.read("gone").unwrap_err(),
            ShellError::FileNotFound("gone".into())
        );
    }

    #[test]
    fn test_list_keeps_creation_order() {
        let mut fs = FileStore::new();
        for name in ["zeta", "alpha", "mid"] {
            fs.create(name).unwrap();
        }
        fs.delete("alpha").unwrap();
        fs.create("alpha").unwrap();

        let names: Vec<&str> = fs.list().collect();
        assert_eq!(names, vec!["zeta", "mid", "alpha"]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut fs = FileStore::new();
        fs.create("Notes").unwrap();
        fs.create("notes").unwrap();
        assert_eq!(fs.len(), 2);
    }
}
