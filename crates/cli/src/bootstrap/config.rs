use twodns_domain::{CliOverrides, Config};

/// Load the configuration, apply CLI overrides and reject invalid values.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
