mod loader;

pub use loader::{
    config_file_path, load_config, validate_config, CliOverrides, Config, ConfigFile, Profile,
};
