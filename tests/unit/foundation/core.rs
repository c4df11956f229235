use super::*;

#[test]
fn zero_ratios_compare_equal_regardless_of_denominator() {
    let a = Ratio {
        numerator: 0,
        denominator: 3,
    };
    let b = Ratio {
        numerator: 0,
        denominator: 7,
    };
    assert_eq!(a, b);
    assert_ne!(
        Ratio {
            numerator: 1,
            denominator: 2
        },
        Ratio {
            numerator: 1,
            denominator: 3
        }
    );
}

#[test]
fn ratio_value_handles_zero_denominator() {
    assert_eq!(Ratio::ONE.value(), 1.0);
    let r = Ratio {
        numerator: 5,
        denominator: 0,
    };
    assert_eq!(r.value(), 0.0);
}

#[test]
fn blend_mode_unknown_values_fall_back_to_normal() {
    assert_eq!(BlendMode::from_u8(2), BlendMode::Screen);
    assert_eq!(BlendMode::from_u8(200), BlendMode::Normal);
    assert_eq!(BlendMode::Add.to_u8(), 16);
}
