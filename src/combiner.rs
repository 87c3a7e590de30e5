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

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::constants::{COMBINED_FILE_PREFIX, FILE_SUFFIX};
use crate::enums::{CombineError, FileRole};
use crate::source_file::SourceFile;

// Fixed order to concatenate the source files.
pub const COMBINE_ORDER: [FileRole; 5] = [
    FileRole::Parameters,
    FileRole::Constants,
    FileRole::ParamAdd,
    FileRole::Program,
    FileRole::ProgAdd,
];

pub struct CombinedProgram {
    // Device name.
    pub device: String,
    // Ordered lines of the combined code.
    pub lines: Vec<String>,
    // Paths of the source files, in the combined order.
    pub sources: Vec<PathBuf>,
}

impl CombinedProgram {
    /// Get the combined text.
    ///
    /// # Returns
    /// All the lines joined with the line separator. Each line, including the
    /// final one, is terminated to avoid the accidental line merging on the
    /// upload.
    pub fn to_text(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut text = self.lines.join("\n");
        text.push('\n');

        text
    }

    /// Get the default output file name: "Combined <device> <date>.gal".
    ///
    /// # Returns
    /// Output file name. The date is the local one, falling back to UTC if
    /// the local offset cannot be determined.
    pub fn default_file_name(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        format!(
            "{} {} {:04}-{:02}-{:02}{}",
            COMBINED_FILE_PREFIX,
            self.device,
            now.year(),
            u8::from(now.month()),
            now.day(),
            FILE_SUFFIX
        )
    }

    /// Write the combined text to a file.
    ///
    /// # Arguments
    /// * `filepath` - Output file path.
    ///
    /// # Returns
    /// Ok if the file is written. Otherwise, the error with the offending
    /// path.
    pub fn write(&self, filepath: &Path) -> Result<(), CombineError> {
        fs::write(filepath, self.to_text())
            .map_err(|error| CombineError::Io(filepath.to_path_buf(), error))
    }
}

pub struct Combiner {
    // Directory that contains the source files.
    dir: PathBuf,
}

impl Combiner {
    /// Create a new combiner.
    ///
    /// # Arguments
    /// * `dir` - Directory that contains the source files.
    ///
    /// # Returns
    /// A new combiner.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Get the ordered file paths required to fully upload the code to the
    /// named device.
    ///
    /// # Arguments
    /// * `device` - Device name (e.g. "35m M2").
    ///
    /// # Returns
    /// Ordered (role, path) pairs. The absent optional files are omitted.
    /// Otherwise, the error that names the missing mandatory file.
    pub fn get_file_paths(&self, device: &str) -> Result<Vec<(FileRole, PathBuf)>, CombineError> {
        let mut paths = Vec::new();
        for role in COMBINE_ORDER {
            let filepath = self.dir.join(role.file_name(device));
            if filepath.exists() {
                paths.push((role, filepath));
            } else if !role.is_optional() {
                return Err(CombineError::MissingMandatoryFile(filepath));
            }
        }

        Ok(paths)
    }

    /// Combine the source files of a device into a single program.
    ///
    /// The lines of each file are appended verbatim. There is no reformatting
    /// and no comment stripping.
    ///
    /// # Arguments
    /// * `device` - Device name.
    ///
    /// # Returns
    /// The combined program. Otherwise, the error of the missing mandatory
    /// file or the failed read.
    pub fn combine(&self, device: &str) -> Result<CombinedProgram, CombineError> {
        let file_paths = self.get_file_paths(device)?;

        let mut lines = Vec::new();
        let mut sources = Vec::new();
        for (role, filepath) in file_paths {
            let source_file = SourceFile::read(role, device, &filepath)?;
            debug!(
                "Appending {} lines from {:?}.",
                source_file.lines.len(),
                filepath
            );

            lines.extend(source_file.lines);
            sources.push(filepath);
        }

        Ok(CombinedProgram {
            device: String::from(device),
            lines: lines,
            sources: sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    use crate::constants::DEFAULT_SOURCE_DIR;

    const DEVICE: &str = "35m M2";

    fn create_source_dir(has_additions: bool) -> TempDir {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("Parameters.gal"), "KP 6,6,6\nKI 0.1,0.1,0.1\n").unwrap();
        fs::write(
            dir.path().join(format!("Constants {DEVICE}.gal")),
            "NAXES=3\n",
        )
        .unwrap();
        fs::write(dir.path().join("Program.gal"), "#MOVE\nBGA\nEN\n").unwrap();

        if has_additions {
            fs::write(dir.path().join(format!("ParamAdd {DEVICE}.gal")), "CN 1\n").unwrap();
            fs::write(
                dir.path().join(format!("ProgAdd {DEVICE}.gal")),
                "#EXTRA\nEN\n",
            )
            .unwrap();
        }

        dir
    }

    #[test]
    fn test_get_file_paths() {
        let dir = create_source_dir(false);
        let combiner = Combiner::new(dir.path());

        let paths = combiner.get_file_paths(DEVICE).unwrap();

        assert_eq!(
            paths.iter().map(|(role, _)| *role).collect::<Vec<_>>(),
            vec![FileRole::Parameters, FileRole::Constants, FileRole::Program]
        );
    }

    #[test]
    fn test_get_file_paths_additions() {
        let dir = create_source_dir(true);
        let combiner = Combiner::new(dir.path());

        let paths = combiner.get_file_paths(DEVICE).unwrap();

        assert_eq!(
            paths.iter().map(|(role, _)| *role).collect::<Vec<_>>(),
            COMBINE_ORDER.to_vec()
        );
    }

    #[test]
    fn test_get_file_paths_missing_mandatory() {
        let dir = create_source_dir(false);
        fs::remove_file(dir.path().join(format!("Constants {DEVICE}.gal"))).unwrap();

        let combiner = Combiner::new(dir.path());

        let error = combiner.get_file_paths(DEVICE).unwrap_err();

        assert!(matches!(error, CombineError::MissingMandatoryFile(..)));
        assert!(error.to_string().contains("Constants 35m M2.gal"));
    }

    #[test]
    fn test_combine() {
        let dir = create_source_dir(false);
        let combiner = Combiner::new(dir.path());

        let program = combiner.combine(DEVICE).unwrap();

        // Parameters ++ Constants ++ Program, in order, with no interleaving.
        assert_eq!(
            program.lines,
            vec!["KP 6,6,6", "KI 0.1,0.1,0.1", "NAXES=3", "#MOVE", "BGA", "EN"]
        );
        assert_eq!(program.device, DEVICE);
        assert_eq!(program.sources.len(), 3);
    }

    #[test]
    fn test_combine_additions() {
        let dir = create_source_dir(true);
        let combiner = Combiner::new(dir.path());

        let program = combiner.combine(DEVICE).unwrap();

        // The additions appear after the Constants and after the Program.
        assert_eq!(
            program.lines,
            vec![
                "KP 6,6,6",
                "KI 0.1,0.1,0.1",
                "NAXES=3",
                "CN 1",
                "#MOVE",
                "BGA",
                "EN",
                "#EXTRA",
                "EN"
            ]
        );
    }

    #[test]
    fn test_combine_repository_files() {
        let combiner = Combiner::new(Path::new(DEFAULT_SOURCE_DIR));

        let program = combiner.combine(DEVICE).unwrap();

        assert_eq!(program.sources.len(), 5);
        assert_eq!(
            program.lines[0],
            "NO Galil parameters common to all the mirror controllers"
        );
        assert_eq!(program.lines.last().unwrap(), "EN");
    }

    #[test]
    fn test_combine_is_deterministic() {
        let dir = create_source_dir(true);
        let combiner = Combiner::new(dir.path());

        let text_first = combiner.combine(DEVICE).unwrap().to_text();
        let text_second = combiner.combine(DEVICE).unwrap().to_text();

        assert_eq!(text_first, text_second);
    }

    #[test]
    fn test_combined_program_to_text() {
        let program = CombinedProgram {
            device: String::from(DEVICE),
            lines: vec![String::from("A=1"), String::from("EN")],
            sources: Vec::new(),
        };

        assert_eq!(program.to_text(), "A=1\nEN\n");

        let empty = CombinedProgram {
            device: String::from(DEVICE),
            lines: Vec::new(),
            sources: Vec::new(),
        };

        assert_eq!(empty.to_text(), "");
    }

    #[test]
    fn test_combined_program_default_file_name() {
        let program = CombinedProgram {
            device: String::from(DEVICE),
            lines: Vec::new(),
            sources: Vec::new(),
        };

        let name = program.default_file_name();

        assert!(name.starts_with("Combined 35m M2 "));
        assert!(name.ends_with(".gal"));

        // The date stamp is "year-month-day".
        let date = &name["Combined 35m M2 ".len()..(name.len() - ".gal".len())];

        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(date.as_bytes()[7], b'-');
    }

    #[test]
    fn test_combined_program_write() {
        let dir = tempdir().unwrap();
        let filepath = dir.path().join("Combined 35m M2.gal");

        let program = CombinedProgram {
            device: String::from(DEVICE),
            lines: vec![String::from("A=1")],
            sources: Vec::new(),
        };
        program.write(&filepath).unwrap();

        assert_eq!(fs::read_to_string(&filepath).unwrap(), "A=1\n");
    }
}
