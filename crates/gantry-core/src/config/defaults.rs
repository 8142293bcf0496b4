//! Default configuration values

/// Default build description file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gantry.toml";

/// Default build description file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gantry.yaml";

/// Name given to the root project when the build description omits one
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".gantry.toml",
        ".gantry.yaml",
    ]
}
