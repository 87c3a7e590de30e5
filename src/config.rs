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

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utility::get_parameter;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Config {
    // Configuration filename.
    pub filename: String,
    // Maximum count of characters per line accepted by the firmware loader.
    pub max_line_length: usize,
    // Maximum count of characters in a label name.
    pub max_label_length: usize,
    // Maximum count of code lines the controller can store. The blank lines
    // and the pure comments are not counted.
    pub max_code_lines: usize,
    // Maximum count of statement labels the controller can store.
    pub max_labels: usize,
    // Non-alphanumeric characters permitted by the command language. The
    // alphanumeric characters and the space are always permitted.
    pub permitted_special_characters: String,
    // Write the combined file even if the validation fails. Only the upload
    // step is gated in that case.
    pub write_on_failure: bool,
}

impl Config {
    /// Create a new config object.
    ///
    /// # Arguments
    /// * `filepath_limits` - The path to the controller limits file.
    ///
    /// # Returns
    /// A new config object.
    pub fn new(filepath_limits: &Path) -> Self {
        Self {
            filename: String::from(filepath_limits.to_str().expect(&format!(
                "Should be able to convert {:?} to a string",
                filepath_limits
            ))),

            max_line_length: get_parameter(filepath_limits, "max_line_length"),
            max_label_length: get_parameter(filepath_limits, "max_label_length"),
            max_code_lines: get_parameter(filepath_limits, "max_code_lines"),
            max_labels: get_parameter(filepath_limits, "max_labels"),
            permitted_special_characters: get_parameter(
                filepath_limits,
                "permitted_special_characters",
            ),

            write_on_failure: get_parameter(filepath_limits, "write_on_failure"),
        }
    }

    /// Check if the character is permitted by the command language.
    ///
    /// # Arguments
    /// * `character` - Character to check.
    ///
    /// # Returns
    /// True if the character is permitted. Otherwise, false.
    pub fn is_permitted_character(&self, character: char) -> bool {
        character.is_ascii_alphanumeric()
            || (character == ' ')
            || self.permitted_special_characters.contains(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::constants::DEFAULT_LIMITS_FILE;

    fn create_config() -> Config {
        Config::new(Path::new(DEFAULT_LIMITS_FILE))
    }

    #[test]
    fn test_new() {
        let config = create_config();

        assert_eq!(config.filename, DEFAULT_LIMITS_FILE);
        assert_eq!(config.max_line_length, 80);
        assert_eq!(config.max_label_length, 7);
        assert_eq!(config.max_code_lines, 999);
        assert_eq!(config.max_labels, 254);
        assert!(!config.write_on_failure);
    }

    #[test]
    fn test_is_permitted_character() {
        let config = create_config();

        assert!(config.is_permitted_character('A'));
        assert!(config.is_permitted_character('z'));
        assert!(config.is_permitted_character('0'));
        assert!(config.is_permitted_character(' '));
        assert!(config.is_permitted_character('#'));
        assert!(config.is_permitted_character('='));
        assert!(config.is_permitted_character(';'));

        // A backslash ends the download early and is not permitted.
        assert!(!config.is_permitted_character('\\'));

        assert!(!config.is_permitted_character('\t'));
        assert!(!config.is_permitted_character('\u{e9}'));
        assert!(!config.is_permitted_character('\u{7f}'));
    }
}
