use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::foundation::core::{Orientation, Subunit};
use crate::resolve::capability::SurfaceCapability;
use crate::resolve::resolver::CancelSource;
use crate::sink::display::DisplayMetrics;

fn profile() -> DeviceProfile {
    DeviceProfile {
        screen_width_px: 1080,
        screen_height_px: 1920,
        status_bar_height_px: 72,
        baseline_density: 3.0,
        baseline_density_dpi: 480,
        baseline_scaled_density: 3.0,
        baseline_xdpi: 400.0,
        baseline_screen_width_dp: 360,
        baseline_screen_height_dp: 640,
        orientation: Orientation::Portrait,
    }
}

fn ready() -> ScalingContext {
    let mut ctx = ScalingContext::default();
    ctx.init(profile()).unwrap();
    ctx.store_mut().set_design_width_in_dp(540).unwrap();
    ctx.store_mut().set_design_height_in_dp(960).unwrap();
    ctx
}

#[test]
fn activation_before_init_is_rejected() {
    let mut ctx = ScalingContext::default();
    let mut sink = DisplayMetrics::default();
    let err = ctx
        .activate(&SurfaceActivation::new("app.Home"), &mut [&mut sink])
        .unwrap_err();
    assert!(matches!(err, AutoscaleError::NotInitialized(_)));
    assert_eq!(ctx.running_state(), RunningState::default());
}

#[test]
fn global_activation_scales_every_sink() {
    let mut ctx = ready();
    let mut surface = DisplayMetrics::baseline(&profile());
    let mut app = DisplayMetrics::baseline(&profile());
    let out = ctx
        .activate(
            &SurfaceActivation::new("app.Home"),
            &mut [&mut surface, &mut app],
        )
        .unwrap()
        .unwrap();
    assert_eq!(out.resolution, Resolution::GlobalDefault(DesignSpec::width(540.0)));
    assert_eq!(out.metrics.density, 2.0);
    assert_eq!(surface.density, 2.0);
    assert_eq!(app.density_dpi, 320);
}

#[test]
fn cancel_activation_restores_baseline_after_scaling() {
    let mut ctx = ready();
    let mut sink = DisplayMetrics::baseline(&profile());
    ctx.activate(&SurfaceActivation::new("app.Home"), &mut [&mut sink])
        .unwrap();
    assert_eq!(sink.density, 2.0);

    ctx.registry().add_cancel("vendor.Camera");
    let out = ctx
        .activate(&SurfaceActivation::new("vendor.Camera"), &mut [&mut sink])
        .unwrap()
        .unwrap();
    assert_eq!(out.resolution, Resolution::Cancel(CancelSource::External));
    assert_eq!(sink, DisplayMetrics::baseline(&profile()));
    assert!(ctx.running_state().registry_engaged);
}

#[test]
fn self_override_with_zero_size_uses_global_height() {
    let mut ctx = ready();
    let mut sink = DisplayMetrics::default();
    let act = SurfaceActivation::new("app.Tall")
        .with_capability(SurfaceCapability::Custom(DesignSpec::height(0.0)));
    let out = ctx.activate(&act, &mut [&mut sink]).unwrap().unwrap();
    assert_eq!(out.resolution, Resolution::SelfOverride(DesignSpec::height(960.0)));
    assert_eq!(out.metrics.density, 2.0);
}

#[test]
fn stop_restores_and_pauses_until_restart() {
    let mut ctx = ready();
    let mut sink = DisplayMetrics::baseline(&profile());
    ctx.adapt_global(&mut [&mut sink]).unwrap();
    assert_eq!(sink.density, 2.0);

    ctx.stop(&mut [&mut sink]).unwrap();
    assert_eq!(sink.density, 3.0);
    assert!(ctx.running_state().stopped);
    assert!(
        ctx.activate(&SurfaceActivation::new("app.Home"), &mut [&mut sink])
            .unwrap()
            .is_none()
    );
    assert_eq!(sink.density, 3.0);

    ctx.restart().unwrap();
    assert!(
        ctx.activate(&SurfaceActivation::new("app.Home"), &mut [&mut sink])
            .unwrap()
            .is_some()
    );
    assert_eq!(sink.density, 2.0);
}

#[test]
fn rotation_refreshes_profile_but_keeps_cached_entries() {
    let mut ctx = ready();
    let mut sink = DisplayMetrics::default();
    ctx.adapt_with(DesignSpec::width(540.0), &mut [&mut sink])
        .unwrap();
    assert_eq!(ctx.engine().cache_len(), 1);

    ctx.on_configuration_changed(&ConfigurationChange {
        screen_width_px: 1920,
        screen_height_px: 1080,
        orientation: Orientation::Landscape,
        status_bar_height_px: None,
        scaled_density: None,
    })
    .unwrap();
    let m = ctx
        .adapt_with(DesignSpec::width(540.0), &mut [&mut sink])
        .unwrap();
    assert_eq!(m.density, 1920.0f32 / 540.0);
    assert_eq!(ctx.engine().cache_len(), 2);
    assert_eq!(ctx.store().profile().unwrap().orientation, Orientation::Landscape);
}

#[test]
fn subunit_policy_writes_xdpi_only_for_subunit() {
    let mut policy = ScalingPolicyConfig::default();
    policy.subunit = Subunit::Pt;
    policy.support_dp = false;
    policy.support_sp = false;
    let mut ctx = ScalingContext::new(policy);
    ctx.init(profile()).unwrap();
    ctx.store_mut().apply_default_design_size();

    let mut sink = DisplayMetrics::baseline(&profile());
    let m = ctx.adapt_global(&mut [&mut sink]).unwrap();
    assert_eq!(m.xdpi, 1.0);
    assert_eq!(sink.xdpi, 72.0);
    assert_eq!(sink.density, 3.0);
}

#[derive(Default)]
struct DecisionCounter(AtomicUsize);

impl AdaptHook for DecisionCounter {
    fn before_adapt(&self, _activation: &SurfaceActivation) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn context_moved_to_another_thread_reports_violation() {
    let mut ctx = ready();
    let counter = Arc::new(DecisionCounter::default());
    ctx.add_hook(counter.clone());
    let registry = Arc::clone(ctx.registry());
    let err = std::thread::spawn(move || {
        let mut ctx = ctx;
        let mut sink = DisplayMetrics::default();
        ctx.activate(&SurfaceActivation::new("app.Home"), &mut [&mut sink])
            .unwrap_err()
    })
    .join()
    .unwrap();
    assert!(matches!(err, AutoscaleError::ConcurrencyViolation(_)));
    assert!(err.to_string().contains("activate"));
    assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    assert!(!registry.is_engaged());
}

#[test]
fn hidden_status_bar_changes_effective_height() {
    let mut policy = ScalingPolicyConfig::default();
    policy.use_device_size = false;
    let mut ctx = ScalingContext::new(policy);
    ctx.init(profile()).unwrap();
    assert_eq!(ctx.store().effective_screen_height().unwrap(), 1848);

    ctx.on_configuration_changed(&ConfigurationChange {
        screen_width_px: 1920,
        screen_height_px: 1080,
        orientation: Orientation::Landscape,
        status_bar_height_px: Some(0),
        scaled_density: None,
    })
    .unwrap();
    assert_eq!(ctx.store().effective_screen_height().unwrap(), 1080);

    let mut sink = DisplayMetrics::default();
    let m = ctx
        .adapt_with(DesignSpec::height(360.0), &mut [&mut sink])
        .unwrap();
    assert_eq!(m.density, 3.0);
}
