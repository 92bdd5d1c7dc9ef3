//! Material file I/O service.
//!
//! This module centralizes finding and loading MTL files, providing a
//! consistent interface and consistent error messages for the CLI.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{models::MaterialRecord, parser};

/// Service for locating and loading material files.
pub struct MaterialService;

impl MaterialService {
    /// Loads a material from an MTL file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the MTL file
    ///
    /// # Returns
    ///
    /// * `Ok(MaterialRecord)` - Successfully parsed material
    /// * `Err(...)` - File not found, I/O error, or a default that does not match its type
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use mtlsheet::services::MaterialService;
    ///
    /// let material = MaterialService::load(Path::new("bronze.mtl"))?;
    /// println!("{} has {} parameters", material.material_name, material.parameters.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<MaterialRecord> {
        parser::parse_mtl_file(path)
    }

    /// Lists the material files directly inside `dir`.
    ///
    /// Files are matched on `extension` case-insensitively and returned sorted
    /// by path so repeated runs produce the same column order. Subdirectories
    /// are not searched.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a directory or cannot be read.
    pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            anyhow::bail!("Input directory not found: {}", dir.display());
        }

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

            if matches {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("b.mtl"), "").unwrap();
        fs::write(dir.join("a.MTL"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::create_dir(dir.join("nested.mtl")).unwrap();

        let files = MaterialService::discover(dir, "mtl").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.MTL", "b.mtl"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let err = MaterialService::discover(Path::new("/no/such/dir"), "mtl").unwrap_err();
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_load_material() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bronze.mtl");
        fs::write(
            &path,
            "{\n  M1 = {\n    Name = BRONZE\n    {\n      Name = T\n      Type = Integer\n      Default = 3\n    }\n  }\n}\n",
        )
        .unwrap();

        let material = MaterialService::load(&path).unwrap();
        assert_eq!(material.material_id, "M1");
        assert_eq!(material.material_name, "BRONZE");
        assert_eq!(material.parameters.len(), 1);
    }
}
