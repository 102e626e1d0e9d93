use crate::domain::ports::OutputSink;
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    async fn write_report(&self, data: &[u8]) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for FileSink {
    async fn write_report(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, data)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_sink_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("lifts.txt");
        let sink = FileSink::new(&path);

        sink.write_report(b"Scraped from: https://example.com\n")
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Scraped from: https://example.com\n");
        assert_eq!(sink.describe(), path.display().to_string());
    }
}
