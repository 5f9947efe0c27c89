use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AutoscaleError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        AutoscaleError::already_initialized("x")
            .to_string()
            .contains("already initialized:")
    );
    assert!(
        AutoscaleError::missing_design_size("x")
            .to_string()
            .contains("missing design size:")
    );
    assert!(
        AutoscaleError::not_initialized("x")
            .to_string()
            .contains("not initialized:")
    );
    assert!(
        AutoscaleError::concurrency_violation("x")
            .to_string()
            .contains("concurrency violation:")
    );
    assert!(
        AutoscaleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AutoscaleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
