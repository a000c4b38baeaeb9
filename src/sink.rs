use std::{fs, io::Write, path::{Path, PathBuf}};

use serde::Serialize;

use crate::errors::AggregatorError;

/// Writes a serializable document as pretty json. The file is staged in
/// a temp file next to the target and renamed over it, so a failed run
/// never leaves a half-written output.
pub struct JsonFileSink {
    path: PathBuf
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn write<T: Serialize>(&self, document: &T) -> Result<&Path, AggregatorError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from(".")
        };

        fs::create_dir_all(&parent).map_err(|e| AggregatorError::Output(
            format!("create dir {}: {e}", parent.display())
        ))?;

        let mut temp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| AggregatorError::Output(
                format!("tempfile in {}: {e}", parent.display())
            ))?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.flush().map_err(|e| AggregatorError::Output(
                format!("flush {}: {e}", self.path.display())
            ))?;
        }

        temp.persist(&self.path).map_err(|e|
            AggregatorError::Output(format!("persist {}: {e}", self.path.display())))?;

        Ok(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_json_and_creates_parent() -> Result<(), AggregatorError> {
        let dir = tempfile::tempdir()?;
        let sink = JsonFileSink::new(dir.path().join("data/out.json"));

        let written = sink.write(&serde_json::json!({"name": "root", "children": []}))?;

        let body = fs::read_to_string(written)?;
        assert_eq!(body, "{\n  \"children\": [],\n  \"name\": \"root\"\n}");
        Ok(())
    }

    #[test]
    fn overwrites_previous_output() -> Result<(), AggregatorError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.json");
        fs::write(&path, "stale")?;

        JsonFileSink::new(&path).write(&vec![1, 2])?;

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(value, serde_json::json!([1, 2]));
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
}
