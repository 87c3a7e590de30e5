// Suffix of all the Galil source code files.
pub const FILE_SUFFIX: &str = ".gal";

// Prefix of a comment line in the Galil command language.
pub const COMMENT_PREFIX: &str = "NO";

// Prefix of a label declaration in the Galil command language.
pub const LABEL_PREFIX: char = '#';

// Prefix of the combined output file name.
pub const COMBINED_FILE_PREFIX: &str = "Combined";

pub const DEFAULT_SOURCE_DIR: &str = "galil";
pub const DEFAULT_LIMITS_FILE: &str = "config/controller_limits.yaml";
