use proptest::prelude::*;
use routerkit_core::{ComplexAmount, JobContext, Rational, RouterBit};

fn eighth_inch_job(native: &str) -> JobContext {
    JobContext::new(
        native,
        &ComplexAmount::parse("1/8in").unwrap(),
        RouterBit::flat(0.125),
    )
    .unwrap()
}

fn unit_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("inch"), Just("mm"), Just("board")]
}

fn rational(max_numerator: i64, max_denominator: i64) -> impl Strategy<Value = Rational> {
    (-max_numerator..=max_numerator, 1..=max_denominator)
        .prop_map(|(n, d)| Rational::new(n, d).unwrap())
}

proptest! {
    #[test]
    fn test_scaling_commutes_with_decoding(
        unit in unit_name(),
        value in rational(1000, 64),
        factor in rational(50, 16),
        native in prop_oneof![Just("inch"), Just("mm")],
    ) {
        let job = eighth_inch_job(native);
        let amount = ComplexAmount::new(unit, value).unwrap();

        let scaled_then_decoded = job.decode_exact(&amount.scale(factor).unwrap()).unwrap();
        let decoded_then_scaled = job.decode_exact(&amount).unwrap() * factor;

        prop_assert_eq!(scaled_then_decoded, decoded_then_scaled);
    }

    #[test]
    fn test_formatted_amount_parses_back(
        inches in rational(1000, 64),
        millimeters in rational(1000, 64),
    ) {
        let amount = ComplexAmount::inches(inches)
            .add(&ComplexAmount::millimeters(millimeters))
            .unwrap();
        let text = amount.to_string();
        prop_assert_eq!(ComplexAmount::parse(&text).unwrap(), amount);
    }
}

#[test]
fn test_board_tracks_thickness_in_both_native_units() {
    let inch_job = eighth_inch_job("inch");
    let mm_job = eighth_inch_job("millimeter");
    let one_board = ComplexAmount::boards(Rational::ONE);

    assert_eq!(inch_job.decode(&one_board).unwrap(), 0.125);
    assert_eq!(
        mm_job.decode_exact(&one_board).unwrap(),
        Rational::new(127, 40).unwrap()
    );
}
