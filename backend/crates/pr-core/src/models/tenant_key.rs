use crate::{CoreError, Result as CoreErrorResult};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one tenant deployment: `project_name + "_" + site_name`.
///
/// Every per-tenant map (device tokens, decorations, icons, tenant config)
/// is keyed by this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantKey(String);

impl TenantKey {
    /// Derive the key from a project and site name.
    ///
    /// Both must be non-empty and are used verbatim; surrounding whitespace
    /// is an error.
    #[track_caller]
    pub fn new(project_name: &str, site_name: &str) -> CoreErrorResult<Self> {
        Self::check_part(project_name, "project_name")?;
        Self::check_part(site_name, "site_name")?;

        Ok(Self(format!("{project_name}_{site_name}")))
    }

    #[track_caller]
    fn check_part(value: &str, field: &str) -> CoreErrorResult<()> {
        if value.trim().is_empty() {
            return Err(CoreError::missing_field(field));
        }
        if value.trim() != value {
            return Err(CoreError::invalid_field(
                field,
                format!("{field} must not have leading or trailing whitespace"),
            ));
        }
        Ok(())
    }

    /// Wrap an already-derived key (as stored in the JSON documents).
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TenantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
