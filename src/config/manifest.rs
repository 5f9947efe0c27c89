use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::policy::ScalingPolicyConfig;
use crate::config::profile::DeviceProfile;
use crate::foundation::core::DesignSpec;
use crate::foundation::error::{AutoscaleError, AutoscaleResult};
use crate::resolve::capability::SurfaceKey;
use crate::resolve::registry::OverrideRegistry;
use crate::session::context::ScalingContext;

/// Externally registered overrides as they appear in a manifest.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalOverrides {
    /// Surface keys that must not be scaled.
    #[serde(default)]
    pub cancel: Vec<SurfaceKey>,
    /// Surface keys with their own design spec.
    #[serde(default)]
    pub overrides: BTreeMap<SurfaceKey, DesignSpec>,
}

/// Host-side scaling configuration document.
///
/// Everything is optional: missing design sizes fall back to the stock defaults, a missing
/// policy is the default policy, and a missing profile leaves the context uninitialized so
/// the host can supply the live profile later.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalingManifest {
    /// Global design width in dp.
    #[serde(default)]
    pub design_width_in_dp: Option<u32>,
    /// Global design height in dp.
    #[serde(default)]
    pub design_height_in_dp: Option<u32>,
    /// Scaling policy.
    #[serde(default)]
    pub policy: ScalingPolicyConfig,
    /// Device profile captured elsewhere (fixtures, tooling).
    #[serde(default)]
    pub profile: Option<DeviceProfile>,
    /// External overrides to register.
    #[serde(default)]
    pub external: ExternalOverrides,
}

impl ScalingManifest {
    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AutoscaleResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AutoscaleError::serde(format!("parse scaling manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AutoscaleResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AutoscaleError::Other(anyhow::anyhow!(
                "open scaling manifest '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate sizes, policy and profile.
    pub fn validate(&self) -> AutoscaleResult<()> {
        for (name, value) in [
            ("design_width_in_dp", self.design_width_in_dp),
            ("design_height_in_dp", self.design_height_in_dp),
        ] {
            if value == Some(0) {
                return Err(AutoscaleError::invalid_argument(format!("{name} must be > 0")));
            }
        }
        self.policy.validate()?;
        if let Some(profile) = &self.profile {
            profile.validate()?;
        }
        Ok(())
    }

    /// Register the manifest's external overrides.
    pub fn register_external(&self, registry: &OverrideRegistry) {
        for key in &self.external.cancel {
            registry.add_cancel(key.clone());
        }
        for (key, spec) in &self.external.overrides {
            registry.add_override(key.clone(), *spec);
        }
    }

    /// Build a context on the calling thread from this manifest.
    pub fn into_context(self) -> AutoscaleResult<ScalingContext> {
        self.validate()?;
        let mut ctx = ScalingContext::new(self.policy.clone());
        if let Some(profile) = self.profile.clone() {
            ctx.init(profile)?;
        }

        let store = ctx.store_mut();
        if let Some(w) = self.design_width_in_dp {
            store.set_design_width_in_dp(w)?;
        }
        if let Some(h) = self.design_height_in_dp {
            store.set_design_height_in_dp(h)?;
        }
        store.apply_default_design_size();

        self.register_external(ctx.registry());
        Ok(ctx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/manifest.rs"]
mod tests;
