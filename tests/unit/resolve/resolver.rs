use std::sync::Mutex;

use super::*;
use crate::foundation::error::AutoscaleError;
use crate::resolve::capability::SurfaceKey;

fn store() -> ConfigurationStore {
    let mut store = ConfigurationStore::default();
    store.set_design_width_in_dp(360).unwrap();
    store.set_design_height_in_dp(640).unwrap();
    store
}

#[test]
fn global_default_when_nothing_declared() {
    let res = default_resolution(
        &SurfaceActivation::new("app.Home"),
        &OverrideRegistry::new(),
        &store(),
    )
    .unwrap();
    assert_eq!(res, Resolution::GlobalDefault(DesignSpec::width(360.0)));
}

#[test]
fn global_default_follows_policy_axis() {
    let mut store = store();
    store.policy_mut().base_on_width = false;
    let res = default_resolution(
        &SurfaceActivation::new("app.Home"),
        &OverrideRegistry::new(),
        &store,
    )
    .unwrap();
    assert_eq!(res, Resolution::GlobalDefault(DesignSpec::height(640.0)));
}

#[test]
fn self_declared_capabilities() {
    let reg = OverrideRegistry::new();
    let custom = SurfaceActivation::new("app.Wide")
        .with_capability(SurfaceCapability::Custom(DesignSpec::width(720.0)));
    assert_eq!(
        default_resolution(&custom, &reg, &store()).unwrap(),
        Resolution::SelfOverride(DesignSpec::width(720.0))
    );
    let cancel = SurfaceActivation::new("app.Raw").with_capability(SurfaceCapability::Cancel);
    assert_eq!(
        default_resolution(&cancel, &reg, &store()).unwrap(),
        Resolution::Cancel(CancelSource::SelfDeclared)
    );
}

#[test]
fn zero_size_overrides_fall_back_to_global_axis() {
    let reg = OverrideRegistry::new();
    reg.add_override("vendor.Pay", DesignSpec::height(0.0));
    assert_eq!(
        default_resolution(&SurfaceActivation::new("vendor.Pay"), &reg, &store()).unwrap(),
        Resolution::ExternalOverride(DesignSpec::height(640.0))
    );
    let own = SurfaceActivation::new("app.Own")
        .with_capability(SurfaceCapability::Custom(DesignSpec::width(-5.0)));
    assert_eq!(
        default_resolution(&own, &reg, &store()).unwrap(),
        Resolution::SelfOverride(DesignSpec::width(360.0))
    );
}

#[test]
fn external_records_beat_self_declared_capabilities() {
    let reg = OverrideRegistry::new();
    reg.add_override("app.Mixed", DesignSpec::width(411.0));
    let act = SurfaceActivation::new("app.Mixed").with_capability(SurfaceCapability::Cancel);
    assert_eq!(
        default_resolution(&act, &reg, &store()).unwrap(),
        Resolution::ExternalOverride(DesignSpec::width(411.0))
    );

    reg.add_cancel("app.Mixed");
    let act = SurfaceActivation::new("app.Mixed")
        .with_capability(SurfaceCapability::Custom(DesignSpec::width(1.0)));
    assert_eq!(
        default_resolution(&act, &reg, &store()).unwrap(),
        Resolution::Cancel(CancelSource::External)
    );
}

#[test]
fn unregistered_keys_ignore_an_engaged_registry() {
    let reg = OverrideRegistry::new();
    reg.add_cancel("vendor.Other");
    assert_eq!(
        default_resolution(&SurfaceActivation::new("app.Home"), &reg, &store()).unwrap(),
        Resolution::GlobalDefault(DesignSpec::width(360.0))
    );
}

#[test]
fn missing_design_size_surfaces_as_error() {
    let err = default_resolution(
        &SurfaceActivation::new("app.Home"),
        &OverrideRegistry::new(),
        &ConfigurationStore::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AutoscaleError::MissingDesignSize(_)));
}

#[test]
fn custom_strategy_replaces_default_rules() {
    let resolver = OverrideResolver::new(AdaptStrategy::custom(|act, reg, store| {
        if act.key.as_str().starts_with("legacy.") {
            return Ok(Resolution::Cancel(CancelSource::SelfDeclared));
        }
        default_resolution(act, reg, store)
    }));
    assert!(matches!(resolver.strategy(), AdaptStrategy::Custom(_)));
    let reg = OverrideRegistry::new();
    assert!(
        resolver
            .resolve(&SurfaceActivation::new("legacy.Old"), &reg, &store())
            .unwrap()
            .is_cancel()
    );
    assert_eq!(
        resolver
            .resolve(&SurfaceActivation::new("app.New"), &reg, &store())
            .unwrap()
            .design_spec(),
        Some(DesignSpec::width(360.0))
    );
}

#[derive(Default)]
struct Journal(Mutex<Vec<String>>);

impl AdaptHook for Journal {
    fn before_adapt(&self, activation: &SurfaceActivation) {
        self.0.lock().unwrap().push(format!("before {}", activation.key));
    }

    fn after_adapt(&self, activation: &SurfaceActivation, resolution: &Resolution) {
        self.0
            .lock()
            .unwrap()
            .push(format!("after {} cancel={}", activation.key, resolution.is_cancel()));
    }
}

#[test]
fn hooks_bracket_each_decision_in_order() {
    let first = Arc::new(Journal::default());
    let second = Arc::new(Journal::default());
    let mut resolver = OverrideResolver::default();
    assert!(matches!(resolver.strategy(), AdaptStrategy::Default));
    resolver.add_hook(first.clone());
    resolver.add_hook(second.clone());

    let act = SurfaceActivation::of::<Journal>();
    resolver
        .resolve(&act, &OverrideRegistry::new(), &store())
        .unwrap();

    let key = SurfaceKey::of::<Journal>();
    let expected = vec![format!("before {key}"), format!("after {key} cancel=false")];
    assert_eq!(*first.0.lock().unwrap(), expected);
    assert_eq!(*second.0.lock().unwrap(), expected);
}
