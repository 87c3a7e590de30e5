use config::Config;
use std::fs;
use std::path::Path;

use crate::enums::CombineError;

/// Trait for parsing the configuration value.
///
/// # Parameters
/// * `Self` - Type of the configuration value.
pub trait ConfigValue: Sized {
    /// Parse the configuration value.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed configuration value.
    fn parse_value(s: &str) -> Self;
}

/// Implement the trait ConfigValue for String.
///
/// # Parameters
/// * `String` - Type of the configuration value.
impl ConfigValue for String {
    fn parse_value(s: &str) -> Self {
        s.to_string()
    }
}

/// Implement the trait ConfigValue for usize.
///
/// # Parameters
/// * `usize` - Type of the configuration value.
impl ConfigValue for usize {
    fn parse_value(s: &str) -> Self {
        s.parse::<usize>()
            .expect(&format!("{s} should parse as usize"))
    }
}

/// Implement the trait ConfigValue for bool.
///
/// # Parameters
/// * `bool` - Type of the configuration value.
impl ConfigValue for bool {
    fn parse_value(s: &str) -> Self {
        s.parse::<bool>()
            .expect(&format!("{s} should parse as bool"))
    }
}

/// Get the configuation from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The configuration.
pub fn get_config(filepath: &Path) -> Config {
    let name = filepath
        .to_str()
        .expect(&format!("Should have the file name in the {:?}", filepath));

    Config::builder()
        .add_source(config::File::with_name(name))
        .build()
        .expect(&format!("Should be able to read the {name}"))
}

/// Get the parameter from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
/// * `key` - Key to find the parameter in the config file.
///
/// # Returns
/// The parameter.
pub fn get_parameter<T: ConfigValue>(filepath: &Path, key: &str) -> T {
    let config = get_config(filepath);

    config
        .get_string(key)
        .map(|v| T::parse_value(&v))
        .expect(&format!("Should find the {key} in the {:?}", filepath))
}

/// Read the lines of a text file.
///
/// # Parameters
/// * `filepath` - Path to the text file.
///
/// # Returns
/// The lines without the line terminators. Otherwise, the error with the
/// offending path.
pub fn read_file_lines(filepath: &Path) -> Result<Vec<String>, CombineError> {
    let text = fs::read_to_string(filepath)
        .map_err(|error| CombineError::Io(filepath.to_path_buf(), error))?;

    Ok(text.lines().map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::constants::DEFAULT_LIMITS_FILE;

    #[test]
    fn test_get_config() {
        let filepath = Path::new(DEFAULT_LIMITS_FILE);
        let max_line_length = get_config(filepath).get_int("max_line_length").unwrap();

        assert_eq!(max_line_length, 80);
    }

    #[test]
    #[should_panic(expected = "Should be able to read the wrong.yaml")]
    fn test_get_config_panic() {
        get_config(Path::new("wrong.yaml"));
    }

    #[test]
    fn test_get_parameter() {
        let filepath = Path::new(DEFAULT_LIMITS_FILE);

        let max_line_length: usize = get_parameter(filepath, "max_line_length");

        assert_eq!(max_line_length, 80);

        let write_on_failure: bool = get_parameter(filepath, "write_on_failure");

        assert!(!write_on_failure);

        let permitted: String = get_parameter(filepath, "permitted_special_characters");

        assert!(permitted.contains('#'));
        assert!(permitted.contains('='));
    }

    #[test]
    fn test_read_file_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NO A comment").unwrap();
        writeln!(file, "A=1").unwrap();

        let lines = read_file_lines(file.path()).unwrap();

        assert_eq!(lines, vec!["NO A comment", "A=1"]);
    }

    #[test]
    fn test_read_file_lines_missing() {
        let error = read_file_lines(Path::new("wrong.gal")).unwrap_err();

        assert!(matches!(error, CombineError::Io(..)));
        assert!(error.to_string().contains("wrong.gal"));
    }
}
