use rstest::rstest;
use tosid_kmac::{
    kmac::Assertion,
    tosid::{Tosid, TosidValidator, WarningKind},
};

const CODES: [&str; 6] = [
    "00B2-SOL-STR-SUN:000-000-000-001",
    "00B2-SIR-STR-DOG",
    "00C3-SOL-PLN-EAR:000-000-000-003",
    "01BWTR-CYC-EVP",
    "10C1-ORG-GOV-USA",
    "11E5-DOC-TRT-OST:196-700-001-000",
];

fn parsed() -> Vec<Tosid> {
    CODES
        .iter()
        .map(|code| Tosid::parse(code).expect("valid TOSID"))
        .collect()
}

#[test]
fn create_then_parse_round_trips_components() {
    for tosid in parsed() {
        let created = Tosid::create(
            tosid.taxonomy_code(),
            tosid.netmask_indicator(),
            tosid.identifier(),
        )
        .expect("registered components");
        let reparsed = Tosid::parse(&created.to_string()).expect("canonical output");
        assert_eq!(reparsed.taxonomy_code(), tosid.taxonomy_code());
        assert_eq!(reparsed.netmask_indicator(), tosid.netmask_indicator());
        assert_eq!(reparsed.identifier(), tosid.identifier());
    }
}

#[test]
fn every_code_matches_empty_pattern_and_itself() {
    for tosid in parsed() {
        assert!(tosid.matches_pattern(""));
        assert!(tosid.matches_pattern(&tosid.to_string()));
    }
}

#[test]
fn compatibility_is_symmetric_and_ignores_identifier() {
    let codes = parsed();
    for a in &codes {
        for b in &codes {
            let expected = a.taxonomy_code() == b.taxonomy_code()
                && a.netmask_indicator() == b.netmask_indicator();
            assert_eq!(a.is_compatible_with(b), expected, "{a} vs {b}");
            assert_eq!(a.is_compatible_with(b), b.is_compatible_with(a));
        }
    }
}

#[test]
fn sun_is_described_as_stellar() {
    let sun = Tosid::parse("00B2-SOL-STR-SUN:000-000-000-001").expect("valid");
    assert_eq!(sun.taxonomy_code(), "00");
    assert_eq!(sun.netmask_indicator(), "B");
    assert_eq!(
        sun.classification_description(),
        "Celestial/Natural - Physical/Material - Stellar Scale"
    );
}

#[test]
fn validator_only_advises() {
    let odd = Tosid::parse("00F4-ART-FCT-TOY").expect("parses despite the mismatch");
    let warnings = TosidValidator::default().validate_semantic_consistency(&odd);
    assert!(warnings
        .iter()
        .any(|warning| warning.kind == WarningKind::DomainMismatch));
}

#[rstest]
#[case(0.42, "radar", 0.42)]
#[case(7.0, "rumour", 1.0)]
#[case(-3.0, "", 0.0)]
fn confidence_is_clamped_and_source_kept(
    #[case] level: f64,
    #[case] source: &str,
    #[case] expected: f64,
) {
    let mut assertion = Assertion::new("F1", "E1", "R1", "E2").expect("valid");
    assertion.set_confidence(level, source);
    assert_eq!(
        (assertion.confidence().level(), assertion.confidence().source()),
        (expected, source)
    );
}

#[rstest]
#[case(false, false, true, false)]
#[case(true, true, true, false)]
#[case(false, true, false, true)]
#[case(true, false, false, true)]
fn polarity_decides_equivalence_and_conflict(
    #[case] first_negated: bool,
    #[case] second_negated: bool,
    #[case] equivalent: bool,
    #[case] conflicting: bool,
) {
    let mut first = Assertion::new("F1", "E1", "R1", "E2").expect("valid");
    let mut second = Assertion::new("F2", "E1", "R1", "E2").expect("valid");
    first.set_negated(first_negated);
    second.set_negated(second_negated);
    assert_eq!(first.is_equivalent(&second), equivalent);
    assert_eq!(first.conflicts(&second), conflicting);
}
