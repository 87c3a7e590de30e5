// This file is part of combine_galil_code.
//
// Developed for the Vera Rubin Observatory Systems.
// This product includes software developed by the LSST Project
// (https://www.lsst.org).
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::{Path, PathBuf};

use crate::enums::{CombineError, FileRole};
use crate::utility::read_file_lines;

#[derive(Debug)]
pub struct SourceFile {
    // Role of the file.
    pub role: FileRole,
    // Device name. None for the global roles.
    pub device: Option<String>,
    // Path of the file.
    pub path: PathBuf,
    // Ordered lines of the file. Immutable once loaded.
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Read a source file.
    ///
    /// # Arguments
    /// * `role` - Role of the file.
    /// * `device` - Device name.
    /// * `filepath` - Path of the file.
    ///
    /// # Returns
    /// The loaded source file. Otherwise, the error with the offending path.
    pub fn read(role: FileRole, device: &str, filepath: &Path) -> Result<Self, CombineError> {
        let lines = read_file_lines(filepath)?;

        Ok(Self {
            role: role,
            device: role.is_device_specific().then(|| String::from(device)),
            path: filepath.to_path_buf(),
            lines: lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read() {
        let dir = tempdir().unwrap();
        let filepath = dir.path().join("Constants 35m M2.gal");
        fs::write(&filepath, "NAXES=3\nRNGA=3842048\n").unwrap();

        let source_file = SourceFile::read(FileRole::Constants, "35m M2", &filepath).unwrap();

        assert_eq!(source_file.role, FileRole::Constants);
        assert_eq!(source_file.device, Some(String::from("35m M2")));
        assert_eq!(source_file.path, filepath);
        assert_eq!(source_file.lines, vec!["NAXES=3", "RNGA=3842048"]);

        assert!(format!("{:?}", source_file).contains("Constants"));
    }

    #[test]
    fn test_read_global() {
        let dir = tempdir().unwrap();
        let filepath = dir.path().join("Parameters.gal");
        fs::write(&filepath, "KP 6,6,6\n").unwrap();

        let source_file = SourceFile::read(FileRole::Parameters, "35m M2", &filepath).unwrap();

        assert!(source_file.device.is_none());
        assert_eq!(source_file.lines, vec!["KP 6,6,6"]);
    }

    #[test]
    fn test_read_missing() {
        let dir = tempdir().unwrap();
        let filepath = dir.path().join("Program.gal");

        let error = SourceFile::read(FileRole::Program, "35m M2", &filepath).unwrap_err();

        assert!(matches!(error, CombineError::Io(..)));
    }
}
