use serde::{Deserialize, Serialize};

/// Controls how a validation outcome is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Fail with an error instead of returning the violation text.
    pub throw: bool,
    /// Drop top-level keys the schema does not declare before validating.
    pub trim: bool,
    /// Return the defaulted value instead of a bare success marker.
    pub populate: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            throw: true,
            trim: false,
            populate: false,
        }
    }
}

impl ValidationOptions {
    pub fn with_throw(mut self, throw: bool) -> Self {
        self.throw = throw;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_populate(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }
}
