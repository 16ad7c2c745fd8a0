//! Settings read from `--config` files.
//!
//! Every field has a default, so an empty file (or no file at all) is valid.

use crate::FailResult;

use factorlab_linalg::{BackendKind, BackendSettings, Decompositions};
use failure::ResultExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Root settings object.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Which decomposition library performs the SVD, LU and eigendecompositions.
    ///
    /// `lapacke` is only available when built with the `lapacke-backend` feature.
    pub backend_kind: BackendKind,

    /// See the type for documentation.
    pub backend: BackendSettings,
}

impl Settings {
    /// Parse YAML, warning (rather than failing) on unrecognized keys.
    pub fn from_reader(mut r: impl Read) -> FailResult<Self> {
        // serde_ignored needs a Deserializer; serde_yaml::Value is one.  But errors
        // coming out of a Value lose all of their location info, so in that case
        // parse again from the string just to get a better message.
        let mut s = String::new();
        r.read_to_string(&mut s)?;

        // an empty document is null, not an empty mapping
        if s.trim().is_empty() {
            return Ok(Settings::default());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(&s)?;
        match serde_ignored::deserialize(value, |path| warn!("Unused config item (possible typo?): {}", path)) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                let _: Settings = serde_yaml::from_str(&s)?;
                Err(e.into())
            },
        }
    }

    /// Read the config file if there is one, else use defaults.
    pub fn load(path: Option<&Path>) -> FailResult<Self> {
        match path {
            None => Ok(Settings::default()),
            Some(path) => {
                let file = File::open(path)
                    .with_context(|_| format!("could not open config file '{}'", path.display()))?;
                let settings = Settings::from_reader(file)
                    .with_context(|_| format!("could not read config file '{}'", path.display()))?;
                Ok(settings)
            },
        }
    }

    pub fn build_backend(&self) -> FailResult<Box<dyn Decompositions + Send + Sync>> {
        debug!("using the {:?} backend with {:?}", self.backend_kind, self.backend);
        Ok(self.backend_kind.build(self.backend)?)
    }
}
