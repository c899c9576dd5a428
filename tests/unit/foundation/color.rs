use super::*;

#[test]
fn parses_with_and_without_hash() {
    assert_eq!(Rgb8::from_hex("#FF4500").unwrap(), Rgb8::new(255, 69, 0));
    assert_eq!(Rgb8::from_hex("ff4500").unwrap(), Rgb8::new(255, 69, 0));
    assert_eq!(" #00a0Ff ".parse::<Rgb8>().unwrap(), Rgb8::new(0, 160, 255));
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "#", "#FFF", "#FF450", "#FF45000", "#FF450080", "#GG4500", "#+F4500", "#ÿÿÿ"] {
        let err = Rgb8::from_hex(bad).unwrap_err();
        assert!(
            matches!(err, WavegramError::InvalidColor(_)),
            "expected InvalidColor for {bad:?}, got {err:?}"
        );
    }
}

#[test]
fn display_round_trips_to_uppercase_hex() {
    let c = Rgb8::new(255, 69, 0);
    assert_eq!(c.to_string(), "#FF4500");
    assert_eq!(c.to_rgba8(), [255, 69, 0, 255]);
}
