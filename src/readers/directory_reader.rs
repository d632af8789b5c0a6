use crate::error::{ProcessingError, Result};
use crate::models::SourceFile;
use crate::readers::CantonReader;
use crate::utils::constants::DEFAULT_FILE_SUFFIX;
use crate::utils::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Finds and reads every canton total file in a directory.
pub struct DirectoryReader {
    file_suffix: String,
}

impl DirectoryReader {
    pub fn new() -> Self {
        Self {
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
        }
    }

    pub fn with_file_suffix(file_suffix: impl Into<String>) -> Self {
        Self {
            file_suffix: file_suffix.into(),
        }
    }

    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }

    /// Files whose name ends with the suffix, sorted by path so that
    /// ingestion order does not depend on directory enumeration.
    pub fn find_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let access_error = |source: std::io::Error| ProcessingError::DirectoryAccess {
            path: dir_path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir_path).map_err(access_error)? {
            let path = entry.map_err(access_error)?.path();

            if !path.is_file() {
                continue;
            }

            let matches = path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(&self.file_suffix))
                .unwrap_or(false);

            if matches {
                files.push(path);
            } else {
                debug!("ignoring {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read every matching file, in sorted order.
    pub fn read_directory(
        &self,
        dir_path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<SourceFile>> {
        let files = self.find_files(dir_path)?;

        if let Some(p) = progress {
            p.set_length(files.len() as u64);
            p.set_message(&format!("Reading {} files...", files.len()));
        }

        let reader = CantonReader::new();
        let mut sources = Vec::with_capacity(files.len());
        for path in &files {
            sources.push(reader.read_rows(path)?);

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        info!(
            "read {} files matching '*{}' from {}",
            sources.len(),
            self.file_suffix,
            dir_path.display()
        );

        Ok(sources)
    }
}

impl Default for DirectoryReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_find_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "COVID19_Fallzahlen_Kanton_ZH_total.csv", "h\n");
        write(dir.path(), "COVID19_Fallzahlen_Kanton_AG_total.csv", "h\n");
        write(dir.path(), "README.md", "docs\n");
        write(dir.path(), "COVID19_Fallzahlen_CH_total.csv.bak", "h\n");
        fs::create_dir(dir.path().join("nested_total.csv")).unwrap();

        let reader = DirectoryReader::with_file_suffix("_total.csv");
        let files = reader.find_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "COVID19_Fallzahlen_Kanton_AG_total.csv",
                "COVID19_Fallzahlen_Kanton_ZH_total.csv",
            ]
        );
    }

    #[test]
    fn test_default_suffix() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "COVID19_Fallzahlen_Kanton_BE_total.csv", "h\n");
        write(dir.path(), "COVID19_Fallzahlen_Kanton_BE_CH_total.csv", "h\n");

        let files = DirectoryReader::new().find_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().ends_with("CH_total.csv"));
    }

    #[test]
    fn test_missing_directory() {
        let result = DirectoryReader::new().find_files(Path::new("/definitely/not/here"));
        assert!(matches!(
            result,
            Err(ProcessingError::DirectoryAccess { ref path, .. }) if path == Path::new("/definitely/not/here")
        ));
    }

    #[test]
    fn test_read_directory() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "A_CH_total.csv",
            "date,time,abbreviation_canton_and_fl,ncumul_tested,ncumul_conf\n2020-03-01,,AG,,5\n",
        );
        write(
            dir.path(),
            "B_CH_total.csv",
            "date,time,abbreviation_canton_and_fl,ncumul_tested,ncumul_conf\n2020-03-01,,BE,,7\n2020-03-02,,BE,,9\n",
        );

        let sources = DirectoryReader::new()
            .read_directory(dir.path(), None)
            .unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].file_name(), "A_CH_total.csv");
        assert_eq!(sources[0].rows.len(), 1);
        assert_eq!(sources[1].rows.len(), 2);
    }
}
