//! Binary settings: an optional `kairanban.toml` layered under
//! `KAIRAN_`-prefixed environment variables.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Directory holding the store files.
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("data_dir", "./data")?
            .add_source(config::File::with_name("kairanban").required(false))
            .add_source(config::Environment::with_prefix("KAIRAN"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
