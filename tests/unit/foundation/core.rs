use super::*;

#[test]
fn fixed8_one_is_256() {
    assert_eq!(Fixed8::ONE.0, 256);
    assert_eq!(Fixed8::ONE.as_f64(), 1.0);
    assert_eq!(Fixed8::from_f64(0.5), Fixed8(128));
}

#[test]
fn fixed8_saturates() {
    assert_eq!(Fixed8::from_f64(1.0e6), Fixed8(i16::MAX));
    assert_eq!(Fixed8::from_f64(-1.0e6), Fixed8(i16::MIN));
}

#[test]
fn color_transform_identity() {
    assert!(ColorTransform::default().is_identity());
    let ct = ColorTransform::alpha(0.5);
    assert!(!ct.is_identity());
    assert_eq!(ct.mult[0], Fixed8::ONE);
    assert_eq!(ct.mult[3], Fixed8(128));
}
