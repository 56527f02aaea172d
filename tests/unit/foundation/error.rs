use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VeilError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VeilError::config("x").to_string().contains("config error:"));
    assert!(
        VeilError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VeilError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: VeilError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, VeilError::Serde(_)));
}
