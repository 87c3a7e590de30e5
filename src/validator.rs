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

use serde::Serialize;
use std::collections::HashMap;

use crate::config::Config;
use crate::constants::{COMMENT_PREFIX, LABEL_PREFIX};
use crate::enums::Severity;

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ValidationIssue {
    // 1-based line number.
    pub line_number: usize,
    // Severity of the issue.
    pub severity: Severity,
    // Message of the issue.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new validation issue.
    ///
    /// # Arguments
    /// * `line_number` - 1-based line number.
    /// * `severity` - Severity of the issue.
    /// * `message` - Message of the issue.
    ///
    /// # Returns
    /// A new validation issue.
    pub fn new(line_number: usize, severity: Severity, message: &str) -> Self {
        Self {
            line_number: line_number,
            severity: severity,
            message: String::from(message),
        }
    }
}

pub struct Validator {
    // Limits of the firmware loader.
    config: Config,
}

impl Validator {
    /// Create a new validator.
    ///
    /// # Arguments
    /// * `config` - Limits of the firmware loader.
    ///
    /// # Returns
    /// A new validator.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Check the lines against the limits of the firmware loader.
    ///
    /// The checks are: the line length, the permitted character set, the
    /// malformed and duplicated labels, the references to nonexistent
    /// statement labels, the counts of code lines and statement labels, and
    /// the patterns the loader mishandles (extra "DL" command, embedded
    /// backslash, comment containing a semicolon).
    ///
    /// All the issues are reported, not just the first one. The per-line
    /// issues keep the line order; the label reference issues are appended
    /// after them, in the order of the references.
    ///
    /// # Arguments
    /// * `lines` - Lines to check.
    ///
    /// # Returns
    /// Ordered validation issues. An empty vector is a pass.
    pub fn check(&self, lines: &[String]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // Well-formed labels that were seen, with the 1-based line number of
        // the first declaration.
        let mut labels: HashMap<String, usize> = HashMap::new();

        // Referenced labels with the 1-based line number of the reference.
        let mut references: Vec<(String, usize)> = Vec::new();

        // Count of the lines stored in the controller, excluding the blank
        // lines and the pure comments.
        let mut count_code_lines = 0;

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                issues.push(ValidationIssue::new(
                    line_number,
                    Severity::Warning,
                    "Blank line is stored in the controller program memory.",
                ));
                continue;
            }

            // A line beginning with a backslash ends the download
            // intentionally.
            if trimmed.starts_with('\\') {
                continue;
            }

            self.check_line_length(line, line_number, &mut issues);
            self.check_characters(line, line_number, &mut issues);

            // A pure comment needs no further checking.
            if trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }

            // The loader issues the download command itself. The rest of the
            // line is not processed, like the original checker does.
            if Self::has_download_command(line) {
                issues.push(ValidationIssue::new(
                    line_number,
                    Severity::Error,
                    "Extra download command DL.",
                ));
                continue;
            }

            count_code_lines += 1;
            if count_code_lines == self.config.max_code_lines + 1 {
                issues.push(ValidationIssue::new(
                    line_number,
                    Severity::Error,
                    &format!(
                        "Code exceeds the maximum of {} lines.",
                        self.config.max_code_lines
                    ),
                ));
            }

            self.check_bad_patterns(line, line_number, &mut issues);
            self.check_label(trimmed, line_number, &mut labels, &mut issues);

            Self::collect_references(trimmed, line_number, &mut references);
        }

        // Every reference should point to a declared statement label.
        for (name, line_number) in references {
            if !labels.contains_key(&name) {
                issues.push(ValidationIssue::new(
                    line_number,
                    Severity::Error,
                    &format!("Reference to the nonexistent statement label \"#{name}\"."),
                ));
            }
        }

        issues
    }

    /// Check the count of characters of the line.
    ///
    /// # Arguments
    /// * `line` - Line to check.
    /// * `line_number` - 1-based line number.
    /// * `issues` - Validation issues to append to.
    fn check_line_length(
        &self,
        line: &str,
        line_number: usize,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let count = line.chars().count();
        if count > self.config.max_line_length {
            issues.push(ValidationIssue::new(
                line_number,
                Severity::Error,
                &format!(
                    "Line has {count} characters and exceeds the maximum of {}.",
                    self.config.max_line_length
                ),
            ));
        }
    }

    /// Check the characters of the line against the permitted set.
    ///
    /// # Arguments
    /// * `line` - Line to check.
    /// * `line_number` - 1-based line number.
    /// * `issues` - Validation issues to append to.
    fn check_characters(&self, line: &str, line_number: usize, issues: &mut Vec<ValidationIssue>) {
        let mut illegal_characters = Vec::new();
        for character in line.chars() {
            if !self.config.is_permitted_character(character)
                && !illegal_characters.contains(&character)
            {
                illegal_characters.push(character);
            }
        }

        if !illegal_characters.is_empty() {
            issues.push(ValidationIssue::new(
                line_number,
                Severity::Error,
                &format!(
                    "Line contains the characters outside the permitted set: {:?}.",
                    illegal_characters
                ),
            ));
        }
    }

    /// Check the line against the patterns the firmware loader mishandles.
    ///
    /// # Arguments
    /// * `line` - Line to check.
    /// * `line_number` - 1-based line number.
    /// * `issues` - Validation issues to append to.
    fn check_bad_patterns(&self, line: &str, line_number: usize, issues: &mut Vec<ValidationIssue>) {
        // The leading-backslash case was handled as the intentional end of
        // the download already.
        if line.contains('\\') {
            issues.push(ValidationIssue::new(
                line_number,
                Severity::Error,
                "Embedded backslash ends the download early.",
            ));
        }

        // An embedded comment runs to the end of the line, so a later
        // semicolon truncates it.
        let stripped = Self::strip_strings(line);
        let segments: Vec<&str> = stripped.split(';').collect();
        for (index, segment) in segments.iter().enumerate() {
            if (index > 0)
                && (index < segments.len() - 1)
                && segment.trim_start().starts_with(COMMENT_PREFIX)
            {
                issues.push(ValidationIssue::new(
                    line_number,
                    Severity::Error,
                    "Comment contains a semicolon.",
                ));
                break;
            }
        }
    }

    /// Check the label declaration of the line, if any.
    ///
    /// # Arguments
    /// * `line` - Trimmed line to check.
    /// * `line_number` - 1-based line number.
    /// * `labels` - Seen labels with the line number of the first declaration.
    /// * `issues` - Validation issues to append to.
    fn check_label(
        &self,
        line: &str,
        line_number: usize,
        labels: &mut HashMap<String, usize>,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if !line.starts_with(LABEL_PREFIX) {
            return;
        }

        // The label name ends at the first whitespace or command separator.
        let name: String = line
            .chars()
            .skip(1)
            .take_while(|character| !character.is_whitespace() && (*character != ';'))
            .collect();

        if name.is_empty() {
            issues.push(ValidationIssue::new(
                line_number,
                Severity::Error,
                "Label declaration has no name.",
            ));
            return;
        }

        if !name.chars().all(|character| character.is_ascii_alphanumeric()) {
            issues.push(ValidationIssue::new(
                line_number,
                Severity::Error,
                &format!("Label {name:?} contains the non-alphanumeric characters."),
            ));
            return;
        }

        if name.chars().count() > self.config.max_label_length {
            issues.push(ValidationIssue::new(
                line_number,
                Severity::Error,
                &format!(
                    "Label {name:?} exceeds the maximum of {} characters.",
                    self.config.max_label_length
                ),
            ));
            return;
        }

        match labels.get(&name) {
            Some(first_line_number) => {
                issues.push(ValidationIssue::new(
                    line_number,
                    Severity::Error,
                    &format!("Label {name:?} is already declared on line {first_line_number}."),
                ));
            }
            None => {
                labels.insert(name, line_number);

                if labels.len() == self.config.max_labels + 1 {
                    issues.push(ValidationIssue::new(
                        line_number,
                        Severity::Error,
                        &format!(
                            "Code exceeds the maximum of {} statement labels.",
                            self.config.max_labels
                        ),
                    ));
                }
            }
        }
    }

    /// Check if the line carries a download command ("DL"), alone or after a
    /// command separator.
    ///
    /// # Arguments
    /// * `line` - Line to check.
    ///
    /// # Returns
    /// True if the line carries a download command. Otherwise, false.
    fn has_download_command(line: &str) -> bool {
        let stripped = Self::strip_strings(line);
        stripped.split(';').any(|segment| {
            let segment = segment.trim_start();
            (segment == "DL")
                || segment.starts_with("DL ")
                || segment.starts_with(&format!("DL{LABEL_PREFIX}"))
        })
    }

    /// Collect the statement label references of the line.
    ///
    /// A label at the start of the line is a declaration, not a reference.
    /// The strings and the embedded comments are dropped before the scan.
    ///
    /// # Arguments
    /// * `line` - Trimmed line to scan.
    /// * `line_number` - 1-based line number.
    /// * `references` - Referenced labels to append to.
    fn collect_references(line: &str, line_number: usize, references: &mut Vec<(String, usize)>) {
        let stripped = Self::strip_strings(line);
        let code = stripped
            .split(';')
            .filter(|segment| !segment.trim_start().starts_with(COMMENT_PREFIX))
            .collect::<Vec<_>>()
            .join(";");

        let characters: Vec<char> = code.chars().collect();
        for index in 1..characters.len() {
            if characters[index] != LABEL_PREFIX {
                continue;
            }

            let name: String = characters[(index + 1)..]
                .iter()
                .take_while(|character| character.is_ascii_alphanumeric())
                .collect();
            if !name.is_empty() {
                references.push((name, line_number));
            }
        }
    }

    /// Strip the quoted strings of the line.
    ///
    /// # Arguments
    /// * `line` - Line to strip.
    ///
    /// # Returns
    /// The line without the quoted strings.
    fn strip_strings(line: &str) -> String {
        let mut stripped = String::new();
        let mut is_in_string = false;
        for character in line.chars() {
            if character == '"' {
                is_in_string = !is_in_string;
                continue;
            }

            if !is_in_string {
                stripped.push(character);
            }
        }

        stripped
    }

    /// Check if the issues are a pass.
    ///
    /// # Arguments
    /// * `issues` - Validation issues.
    ///
    /// # Returns
    /// True if there is no issue with the error severity. The warnings do not
    /// fail the run.
    pub fn is_pass(issues: &[ValidationIssue]) -> bool {
        !issues
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }
}
