//! 補完シナリオの統合テスト
//!
//! 簡易エディタホストに対してシナリオ実行器を走らせ、件数・選択位置・挿入結果を検証

mod common;

use common::{fixture_matcher, fixture_source, LineEditorHost};
use csscomp::error::ScenarioError;
use csscomp::scenario::{ExpectedPopup as E, ScenarioStep};
use csscomp::{
    style_editor_scenario, AliasMode, CompError, KeywordDictionary, ScenarioRunner,
    SuggestionMatcher,
};

const RULE_START: &str = "div {\n  ";

fn declaration_scenario(matcher: &SuggestionMatcher) -> Vec<ScenarioStep> {
    let all = matcher.count_properties("");
    let b = matcher.count_properties("b");
    let ba = matcher.count_properties("ba");
    let bg_b = matcher.count_values("background", "b").unwrap();
    let bg_bl = matcher.count_values("background", "bl").unwrap();

    let table = [
        (None, E::open(all, 0)),
        (Some("b"), E::open(b, 0)),
        (Some("a"), E::open(ba, 0)),
        (Some("VK_DOWN"), E::open_inserted(ba, 0)),
        (Some("VK_TAB"), E::open_inserted(ba, 1)),
        (Some(":"), E::closed()),
        (Some("b"), E::open(bg_b, 0)),
        (Some("l"), E::open(bg_bl, 0)),
        (Some("VK_TAB"), E::open_inserted(bg_bl, 0)),
        (Some("VK_DOWN"), E::open_inserted(bg_bl, 1)),
        (Some("VK_UP"), E::open_inserted(bg_bl, 0)),
        (Some("VK_TAB"), E::open_inserted(bg_bl, 1)),
        (Some("VK_TAB"), E::open_inserted(bg_bl, 2)),
        (Some("VK_RETURN"), E::Closed { inserted: Some(2) }),
        (Some(";"), E::closed()),
        (Some("d"), E::open(1, 0)),
        (Some("VK_RIGHT"), E::closed()),
        (Some("VK_DOWN"), E::closed()),
    ];

    table
        .into_iter()
        .map(|(name, expected)| match name {
            Some(name) => ScenarioStep::press(name, expected).unwrap(),
            None => ScenarioStep::request(expected),
        })
        .collect()
}

#[test]
fn test_fixture_counts_hit_the_cap() {
    let matcher = fixture_matcher();
    assert_eq!(matcher.count_properties(""), 15);
    assert_eq!(matcher.count_properties("b"), 15);
    assert_eq!(
        matcher.suggest_properties("ba"),
        ["backface-visibility", "background", "background-color"]
    );
    assert_eq!(matcher.count_values("background", "bl").unwrap(), 3);
}

#[test]
fn test_declaration_scenario_passes_against_conforming_editor() {
    let matcher = fixture_matcher();
    let steps = declaration_scenario(&matcher);
    let mut host = LineEditorHost::new(matcher, RULE_START);

    let report = ScenarioRunner::new(steps).run(&mut host).unwrap();

    assert!(report.passed(), "{:?}", report.failures);
    assert_eq!(report.steps_run, 18);
    assert_eq!(host.text(), "div {\n  background:blur(1px);d");
}

#[test]
fn test_editor_with_smaller_cap_is_reported() {
    let oracle = fixture_matcher();
    let steps = declaration_scenario(&oracle);
    let dictionary = KeywordDictionary::load(&fixture_source(), AliasMode::Include);
    let editor_matcher = SuggestionMatcher::with_max_suggestions(dictionary, 10).unwrap();
    let mut host = LineEditorHost::new(editor_matcher, RULE_START);

    let report = ScenarioRunner::new(steps).run(&mut host).unwrap();

    let failed_steps: Vec<usize> = report.failures.iter().map(|f| f.step).collect();
    assert_eq!(failed_steps, [0, 1]);
    assert!(report.failures[0].message.contains("expected 15"));
}

#[test]
fn test_fail_fast_stops_at_first_mismatch() {
    let oracle = fixture_matcher();
    let steps = declaration_scenario(&oracle);
    let dictionary = KeywordDictionary::load(&fixture_source(), AliasMode::Exclude);
    let editor_matcher = SuggestionMatcher::with_max_suggestions(dictionary, 2).unwrap();
    let mut host = LineEditorHost::new(editor_matcher, RULE_START);

    let result = ScenarioRunner::new(steps).with_fail_fast(true).run(&mut host);
    assert!(matches!(
        result,
        Err(CompError::Scenario(ScenarioError::StepFailed { step: 0, .. }))
    ));
}

#[test]
fn test_disabled_editor_offers_no_popup() {
    let matcher = fixture_matcher();
    let mut host = LineEditorHost::disabled(matcher, RULE_START);
    assert!(ScenarioRunner::verify_disabled(&host).is_ok());

    let steps = vec![
        ScenarioStep::press("b", E::closed()).unwrap(),
        ScenarioStep::press("a", E::closed()).unwrap(),
    ];
    let report = ScenarioRunner::new(steps).run(&mut host).unwrap();
    assert!(report.passed());

    let enabled = LineEditorHost::new(fixture_matcher(), RULE_START);
    assert!(ScenarioRunner::verify_disabled(&enabled).is_err());
}

#[test]
fn test_style_editor_scenario_builds_from_fixture() {
    let matcher = fixture_matcher();
    let steps = style_editor_scenario(&matcher).unwrap();

    assert_eq!(steps.len(), 48);
    assert_eq!(steps[14].expected, E::open(15, 0));
    assert_eq!(steps[15].expected, E::open(3, 0));
    assert_eq!(steps[19].expected, E::open(4, 0));
    assert!(steps.iter().filter(|s| s.expected.is_open()).count() > 10);
}
