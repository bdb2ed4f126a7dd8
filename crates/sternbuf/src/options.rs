//! Builder configuration.

use serde::{Deserialize, Serialize};

/// How float slots decide whether they equal their declared default.
///
/// Plain `==` cannot suppress a NaN default (NaN never equals itself), so the
/// policy is explicit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatDefaultPolicy {
    /// Suppress iff the value's bit pattern equals the default's. A NaN
    /// value with the default's exact payload is omitted; `-0.0` is kept
    /// when the default is `0.0`.
    #[default]
    BitPattern,
    /// Never suppress float slots.
    AlwaysStore,
}

/// Options accepted by [`Builder::with_options`](crate::Builder::with_options).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Bytes allocated up front. The buffer doubles when exhausted.
    pub initial_capacity: usize,
    /// Store slot values even when they equal the declared default.
    pub force_defaults: bool,
    pub float_defaults: FloatDefaultPolicy,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            force_defaults: false,
            float_defaults: FloatDefaultPolicy::BitPattern,
        }
    }
}

impl BuilderOptions {
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }
}
