use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WavegramError::unreadable_audio("x")
            .to_string()
            .contains("unreadable audio:")
    );
    assert!(
        WavegramError::image_load("x")
            .to_string()
            .contains("image load error:")
    );
    assert!(
        WavegramError::invalid_color("x")
            .to_string()
            .contains("invalid color:")
    );
    assert!(
        WavegramError::invalid_resolution("x")
            .to_string()
            .contains("invalid resolution:")
    );
    assert!(
        WavegramError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        WavegramError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WavegramError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
