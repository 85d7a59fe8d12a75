use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Append-only sink for generated source text
pub trait Emitter {
    fn append(&mut self, text: &str);
}

impl Emitter for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }
}

/// One generated source file: logical name, target package, contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub package: String,
    pub name: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            contents: String::new(),
        }
    }
}

/// Destination for generated files.
///
/// A generator run opens at most one file, writes through the returned
/// emitter, and calls `finish` when done. Opening a new file while another
/// is pending closes the previous one first.
pub trait OutputTarget {
    fn create_file(&mut self, package: &str, name: &str) -> io::Result<&mut dyn Emitter>;

    /// Close the destination; flushes any pending file.
    fn finish(&mut self) -> io::Result<()>;
}

/// Output target that keeps generated files in memory
#[derive(Debug, Default)]
pub struct MemoryTarget {
    files: Vec<GeneratedFile>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn file(&self, package: &str, name: &str) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|f| f.package == package && f.name == name)
    }
}

impl OutputTarget for MemoryTarget {
    fn create_file(&mut self, package: &str, name: &str) -> io::Result<&mut dyn Emitter> {
        let index = self.files.len();
        self.files.push(GeneratedFile::new(package, name));
        Ok(&mut self.files[index].contents)
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output target that writes generated files under a root directory,
/// one `<root>/<package as dirs>/<name>.kt` per created file.
#[derive(Debug)]
pub struct DiskTarget {
    root: PathBuf,
    pending: Option<GeneratedFile>,
}

impl DiskTarget {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pending: None,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = self.pending.take() {
            let dir = self.root.join(file.package.replace('.', "/"));
            fs::create_dir_all(&dir)?;
            fs::write(dir.join(format!("{}.kt", file.name)), file.contents)?;
        }
        Ok(())
    }
}

impl OutputTarget for DiskTarget {
    fn create_file(&mut self, package: &str, name: &str) -> io::Result<&mut dyn Emitter> {
        self.flush()?;
        let file = self.pending.insert(GeneratedFile::new(package, name));
        Ok(&mut file.contents)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_target_accumulates_appends() {
        let mut target = MemoryTarget::new();
        {
            let file = target.create_file("com.example", "Out").unwrap();
            file.append("line one\n");
            file.append("line two\n");
        }
        target.finish().unwrap();

        let file = target.file("com.example", "Out").unwrap();
        assert_eq!(file.contents, "line one\nline two\n");
    }

    #[test]
    fn test_memory_target_without_create_has_no_files() {
        let mut target = MemoryTarget::new();
        target.finish().unwrap();
        assert!(target.files().is_empty());
    }
}
