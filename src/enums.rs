use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use strum_macros::{AsRefStr, EnumIter, FromRepr, VariantNames};

use crate::constants::FILE_SUFFIX;

/// Role of a Galil source code file.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, Hash, Eq, EnumIter, VariantNames, AsRefStr)]
#[repr(u8)]
pub enum FileRole {
    Parameters,
    Constants,
    ParamAdd,
    Program,
    ProgAdd,
}

impl FileRole {
    /// Is the file specific to a device or not?
    ///
    /// # Returns
    /// True if the file name carries the device name. Otherwise, false.
    pub fn is_device_specific(&self) -> bool {
        matches!(
            *self,
            FileRole::Constants | FileRole::ParamAdd | FileRole::ProgAdd
        )
    }

    /// Is the file optional or not?
    ///
    /// # Returns
    /// True if a device may omit the file. Otherwise, false.
    pub fn is_optional(&self) -> bool {
        matches!(*self, FileRole::ParamAdd | FileRole::ProgAdd)
    }

    /// Get the file name for a device.
    ///
    /// # Arguments
    /// * `device` - Device name (e.g. "35m M2").
    ///
    /// # Returns
    /// File name. Device-specific roles use the naming convention of
    /// "<role> <device>.gal". Otherwise, "<role>.gal".
    pub fn file_name(&self, device: &str) -> String {
        if self.is_device_specific() {
            format!("{} {}{}", self.as_ref(), device, FILE_SUFFIX)
        } else {
            format!("{}{}", self.as_ref(), FILE_SUFFIX)
        }
    }
}

/// Severity of a validation issue.
#[derive(Serialize, Debug, PartialEq, Clone, Copy, VariantNames, AsRefStr)]
pub enum Severity {
    Error,
    Warning,
}

/// Error to combine the Galil source code files.
#[derive(Debug)]
pub enum CombineError {
    // A mandatory source file is absent.
    MissingMandatoryFile(PathBuf),
    // A file exists but cannot be read or written.
    Io(PathBuf, io::Error),
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineError::MissingMandatoryFile(path) => {
                write!(
                    f,
                    "File {:?} missing; bad device name or directory.",
                    path
                )
            }
            CombineError::Io(path, error) => {
                write!(f, "Failed to access the file {:?}: {error}.", path)
            }
        }
    }
}

impl std::error::Error for CombineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_file_role_is_device_specific() {
        assert!(!FileRole::Parameters.is_device_specific());
        assert!(FileRole::Constants.is_device_specific());
        assert!(FileRole::ParamAdd.is_device_specific());
        assert!(!FileRole::Program.is_device_specific());
        assert!(FileRole::ProgAdd.is_device_specific());
    }

    #[test]
    fn test_file_role_is_optional() {
        assert!(!FileRole::Parameters.is_optional());
        assert!(!FileRole::Constants.is_optional());
        assert!(FileRole::ParamAdd.is_optional());
        assert!(!FileRole::Program.is_optional());
        assert!(FileRole::ProgAdd.is_optional());
    }

    #[test]
    fn test_file_role_file_name() {
        assert_eq!(FileRole::Parameters.file_name("35m M2"), "Parameters.gal");
        assert_eq!(FileRole::Program.file_name("35m M2"), "Program.gal");

        assert_eq!(
            FileRole::Constants.file_name("35m M2"),
            "Constants 35m M2.gal"
        );
        assert_eq!(
            FileRole::ParamAdd.file_name("SDSS M1"),
            "ParamAdd SDSS M1.gal"
        );
        assert_eq!(FileRole::ProgAdd.file_name("SDSS M1"), "ProgAdd SDSS M1.gal");
    }

    #[test]
    fn test_combine_error_display() {
        let error = CombineError::MissingMandatoryFile(Path::new("Constants X.gal").to_path_buf());

        assert_eq!(
            error.to_string(),
            "File \"Constants X.gal\" missing; bad device name or directory."
        );

        let error = CombineError::Io(
            Path::new("Program.gal").to_path_buf(),
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );

        assert_eq!(
            error.to_string(),
            "Failed to access the file \"Program.gal\": permission denied."
        );
    }
}
