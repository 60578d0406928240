use super::common::{candidate, company, company_scoped_options, mention, other_company_id};
use crate::workflows::resolution::domain::{MatchOptions, MatchPolicy, MatchStatus};
use crate::workflows::resolution::matcher::EntityMatcher;

#[test]
fn exact_name_auto_matches() {
    let matcher = EntityMatcher::default();
    let company = company();
    let candidates = vec![
        candidate("1", "Robert Hale", company.company_id.clone(), None),
        candidate("2", "Dana Cole", company.company_id.clone(), None),
    ];

    let result = matcher.match_entity(
        &mention("Robert Hale"),
        &company,
        &candidates,
        &MatchOptions::default(),
    );

    assert_eq!(result.status, MatchStatus::Matched);
    assert_eq!(result.score, 100);
    let matched = result.matched.expect("auto-accepted candidate");
    assert_eq!(matched.display_name, "Robert Hale");
}

#[test]
fn mid_band_score_requires_manual_review() {
    let matcher = EntityMatcher::default();
    let company = company();
    let candidates = vec![candidate(
        "1",
        "John Albright",
        company.company_id.clone(),
        None,
    )];

    let result = matcher.match_entity(
        &mention("Jon Albright"),
        &company,
        &candidates,
        &MatchOptions::default(),
    );

    assert_eq!(result.status, MatchStatus::ManualReview);
    assert!(result.matched.is_none());
    assert!(result.score >= 60 && result.score < 90, "{}", result.score);
}

#[test]
fn low_score_yields_new_entity_with_ranked_candidates() {
    let matcher = EntityMatcher::default();
    let company = company();
    let candidates = vec![candidate(
        "1",
        "Martin Reyes",
        company.company_id.clone(),
        None,
    )];

    let result = matcher.match_entity(
        &mention("Dana Cole"),
        &company,
        &candidates,
        &MatchOptions::default(),
    );

    assert_eq!(result.status, MatchStatus::NewEntity);
    assert!(result.matched.is_none());
    assert!(result.score < 60);
    assert_eq!(result.ranked.len(), 1);
}

#[test]
fn zero_candidates_always_yields_new_entity_score_zero() {
    let matcher = EntityMatcher::default();
    let company = company();

    let result = matcher.match_entity(
        &mention("Anyone At All"),
        &company,
        &[],
        &MatchOptions::default(),
    );

    assert_eq!(result.status, MatchStatus::NewEntity);
    assert_eq!(result.score, 0);
    assert!(result.ranked.is_empty());
}

#[test]
fn company_scope_excludes_candidates_from_other_companies() {
    let matcher = EntityMatcher::default();
    let company = company();
    let candidates = vec![candidate("1", "Robert Hale", other_company_id(), None)];

    let result = matcher.match_entity(
        &mention("Robert Hale"),
        &company,
        &candidates,
        &company_scoped_options(),
    );

    assert_eq!(result.status, MatchStatus::NewEntity);
    assert_eq!(result.score, 0);
    assert!(result.ranked.is_empty());
}

#[test]
fn title_hint_boost_can_lift_a_nickname_match_into_auto_accept() {
    let matcher = EntityMatcher::default();
    let company = company();
    let candidates = vec![candidate(
        "1",
        "Robert",
        company.company_id.clone(),
        Some("VP, HR & Benefits"),
    )];
    let options = MatchOptions {
        require_company_match: false,
        title_hint: Some("benefits".to_string()),
    };

    let boosted = matcher.match_entity(&mention("Bob"), &company, &candidates, &options);
    let plain = matcher.match_entity(
        &mention("Bob"),
        &company,
        &candidates,
        &MatchOptions::default(),
    );

    assert_eq!(plain.score, 85);
    assert_eq!(plain.status, MatchStatus::ManualReview);
    assert_eq!(boosted.score, 95);
    assert_eq!(boosted.status, MatchStatus::Matched);
}

#[test]
fn ranked_list_is_sorted_descending() {
    let matcher = EntityMatcher::default();
    let company = company();
    let candidates = vec![
        candidate("1", "Martin Reyes", company.company_id.clone(), None),
        candidate("2", "Dana Cole", company.company_id.clone(), None),
        candidate("3", "Dana Coleman", company.company_id.clone(), None),
    ];

    let result = matcher.match_entity(
        &mention("Dana Cole"),
        &company,
        &candidates,
        &MatchOptions::default(),
    );

    let scores: Vec<u8> = result.ranked.iter().map(|entry| entry.score).collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);
    assert_eq!(result.ranked[0].candidate.display_name, "Dana Cole");
}

#[test]
fn thresholds_come_from_the_policy() {
    let strict = EntityMatcher::new(MatchPolicy {
        auto_accept_threshold: 100,
        min_match_threshold: 95,
    });
    let company = company();
    let candidates = vec![candidate("1", "Robert", company.company_id.clone(), None)];

    let result = strict.match_entity(
        &mention("Bob"),
        &company,
        &candidates,
        &MatchOptions::default(),
    );

    // 85 sits below the raised floor, so the strict policy rejects it.
    assert_eq!(result.status, MatchStatus::NewEntity);
}
