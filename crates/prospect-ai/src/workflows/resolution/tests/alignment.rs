use crate::workflows::resolution::alignment::{AlignmentPolicy, EmployerAlignmentGuard};

#[test]
fn missing_observation_is_a_provisional_pass() {
    let guard = EmployerAlignmentGuard::default();

    let outcome = guard.check(None, "Midwest Benefits Partners");
    assert!(outcome.aligned);
    assert!(outcome.provisional);
    assert_eq!(outcome.score, 1.0);

    let blank = guard.check(Some("   "), "Midwest Benefits Partners");
    assert!(blank.provisional);
}

#[test]
fn punctuation_variants_align_exactly() {
    let guard = EmployerAlignmentGuard::default();

    let outcome = guard.check(
        Some("Midwest Benefits Partners, Inc."),
        "Midwest Benefits Partners Inc",
    );

    assert!(outcome.aligned);
    assert!(!outcome.provisional);
    assert_eq!(outcome.score, 1.0);
}

#[test]
fn suffix_containment_counts_toward_alignment() {
    let guard = EmployerAlignmentGuard::default();

    let outcome = guard.check(
        Some("Midwest Benefits Partners LLC"),
        "Midwest Benefits Partners",
    );

    assert!(outcome.aligned, "score {}", outcome.score);
    assert!(outcome.score >= 0.85);
}

#[test]
fn unrelated_employer_fails_alignment() {
    let guard = EmployerAlignmentGuard::default();

    let outcome = guard.check(Some("Acme"), "Acme Insurance Group");
    assert!(!outcome.aligned);
    assert!(outcome.score < 0.5, "score {}", outcome.score);
}

#[test]
fn threshold_is_configurable_and_sanitized() {
    let lenient = EmployerAlignmentGuard::with_policy(AlignmentPolicy::new(0.6));
    let outcome = lenient.check(
        Some("Midwest Benefits"),
        "Midwest Benefits Partners",
    );
    assert!(outcome.aligned, "score {}", outcome.score);

    let garbage = AlignmentPolicy::new(f32::NAN);
    assert_eq!(garbage.threshold(), AlignmentPolicy::default().threshold());
}
