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

use log::{error, info, warn};
use std::path::Path;

use crate::combiner::Combiner;
use crate::config::Config;
use crate::enums::Severity;
use crate::validator::{ValidationIssue, Validator};

/// Combine and check the Galil source code files of a device.
///
/// The combined file is written only if the validation passes, unless the
/// configuration selects to always write and only gate the upload step.
///
/// # Arguments
/// * `device` - Device name (e.g. "35m M2").
/// * `dir` - Directory that contains the source files.
/// * `output` - Output file path. If None, the default file name in `dir` is
/// used.
/// * `filepath_limits` - Path to the controller limits file.
/// * `is_check_only` - Check the code without writing the combined file.
/// * `is_json` - Print the validation issues as JSON to the standard output.
///
/// # Returns
/// Ok if the code was combined and passed the check. Otherwise, the error
/// message.
pub fn run(
    device: &str,
    dir: &Path,
    output: Option<&Path>,
    filepath_limits: &Path,
    is_check_only: bool,
    is_json: bool,
) -> Result<(), String> {
    info!("Generating the list of files for device {device:?}.");

    let combiner = Combiner::new(dir);
    let program = combiner.combine(device).map_err(|error| error.to_string())?;

    for source in program.sources.iter() {
        info!("Using the file: {source:?}.");
    }

    info!("Checking the combined program of {} lines.", program.lines.len());

    let config = Config::new(filepath_limits);
    let validator = Validator::new(&config);
    let issues = validator.check(&program.lines);

    report_issues(&issues, is_json);

    let is_pass = Validator::is_pass(&issues);
    let filepath_output = match output {
        Some(filepath) => filepath.to_path_buf(),
        None => dir.join(program.default_file_name()),
    };

    if (is_pass || config.write_on_failure) && !is_check_only {
        program
            .write(&filepath_output)
            .map_err(|error| error.to_string())?;

        info!("The combined code was written to the file: {filepath_output:?}.");
    }

    if !is_pass {
        let count = issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count();

        return Err(format!(
            "Found {count} error(s) in the combined code of device {device:?}."
        ));
    }

    if !is_check_only {
        log_upload_instructions();
    }

    Ok(())
}

/// Report the validation issues.
///
/// # Arguments
/// * `issues` - Validation issues.
/// * `is_json` - Print the issues as JSON to the standard output instead of
/// logging them.
fn report_issues(issues: &[ValidationIssue], is_json: bool) {
    if is_json {
        match serde_json::to_string(issues) {
            Ok(json) => println!("{json}"),
            Err(error) => error!("Failed to serialize the issues: {error}."),
        }
        return;
    }

    for issue in issues {
        match issue.severity {
            Severity::Error => error!("Line {}: {}", issue.line_number, issue.message),
            Severity::Warning => warn!("Line {}: {}", issue.line_number, issue.message),
        }
    }
}

/// Log the steps to follow after the combined code is written.
fn log_upload_instructions() {
    info!("The next steps are:");
    info!("- Disable the motors attached to the Galil before the upload.");
    info!("- Upload the combined file to the Galil and fix any reported error.");
    info!("- Test the Galil with at least: XQ#SHOWPAR and XQ#STATUS.");
    info!("- Save to the flash memory with: BN, BV and BP.");
}
