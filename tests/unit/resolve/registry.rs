use std::sync::Arc;

use super::*;

#[test]
fn starts_disengaged_and_engages_on_first_mutation() {
    let reg = OverrideRegistry::new();
    assert!(!reg.is_engaged());
    assert!(reg.is_empty());
    reg.add_override("com.vendor.Login", DesignSpec::width(375.0));
    assert!(reg.is_engaged());
    assert_eq!(
        reg.lookup(&SurfaceKey::new("com.vendor.Login")),
        Some(DesignSpec::width(375.0))
    );
}

#[test]
fn cancel_wins_regardless_of_registration_order() {
    let reg = OverrideRegistry::new();
    reg.add_override("a", DesignSpec::width(1.0)).add_cancel("a");
    reg.add_cancel("b").add_override("b", DesignSpec::width(1.0));
    for key in ["a", "b"] {
        let key = SurfaceKey::new(key);
        assert!(reg.is_cancelled(&key));
        assert_eq!(reg.record(&key), Some(OverrideRecord::Cancel));
    }
    assert_eq!(reg.record(&SurfaceKey::new("c")), None);
}

#[test]
fn later_override_replaces_earlier() {
    let reg = OverrideRegistry::new();
    reg.add_override("a", DesignSpec::width(360.0));
    reg.add_override("a", DesignSpec::height(640.0));
    assert_eq!(
        reg.record(&SurfaceKey::new("a")),
        Some(OverrideRecord::Custom(DesignSpec::height(640.0)))
    );
    assert_eq!(reg.len(), 1);
}

#[test]
fn concurrent_registration_is_lossless() {
    let reg = Arc::new(OverrideRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let reg = Arc::clone(&reg);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let key = format!("surface.{t}.{i}");
                    if i % 2 == 0 {
                        reg.add_cancel(key);
                    } else {
                        reg.add_override(key, DesignSpec::width(i as f32));
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(reg.len(), 400);
    assert!(reg.is_cancelled(&SurfaceKey::new("surface.3.10")));
    assert_eq!(
        reg.lookup(&SurfaceKey::new("surface.7.49")),
        Some(DesignSpec::width(49.0))
    );
}
