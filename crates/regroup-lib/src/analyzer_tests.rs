use indoc::indoc;
use regroup_core::{AnalysisOutcome, GroupSequence, Presence, VerboseResolution};

use crate::analyzer::{CallOutcome, CallSite, PatternAnalyzer, analyze};
use crate::bridge::CompiledPattern;
use crate::config::AnalyzerConfig;
use crate::diagnostics::Diagnostics;
use crate::flags::FlagExpr;
use crate::refine::GroupRef;
use crate::test_utils::FakeCompiler;
use crate::Error;

fn render(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::Groups(groups) => groups.to_string(),
        AnalysisOutcome::Invalid(err) => format!("error: {err}"),
    }
}

fn refined(outcome: CallOutcome) -> GroupSequence {
    match outcome {
        CallOutcome::Refined(groups) => groups,
        other => panic!("expected refined groups, got {other:?}"),
    }
}

#[test]
fn analyze_scans_valid_patterns() {
    let compiler = FakeCompiler::new();
    insta::assert_snapshot!(
        render(&analyze("(?P<a>x)(y)?|z", false, &compiler)),
        @"[(a, optional), (_, optional)]"
    );
    insta::assert_snapshot!(render(&analyze("", false, &compiler)), @"[]");
    assert_eq!(compiler.calls(), 2);
}

#[test]
fn analyze_carries_compiler_errors_verbatim() {
    let compiler = FakeCompiler::new().reject("(", "missing ), unterminated subpattern at position 0");
    insta::assert_snapshot!(
        render(&analyze("(", false, &compiler)),
        @"error: missing ), unterminated subpattern at position 0"
    );
}

#[test]
fn analyze_backfills_names_from_compiler() {
    let compiler = FakeCompiler::new().script(
        "(a)(b)",
        Ok(CompiledPattern::new(2).with_name("second", 2)),
    );
    insta::assert_snapshot!(
        render(&analyze("(a)(b)", false, &compiler)),
        @"[(_, mandatory), (second, mandatory)]"
    );
}

#[test]
fn analyze_keeps_scanned_names() {
    let compiler = FakeCompiler::new().script(
        "(?P<x>a)",
        Ok(CompiledPattern::new(1).with_name("other", 1)),
    );
    insta::assert_snapshot!(
        render(&analyze("(?P<x>a)", false, &compiler)),
        @"[(x, mandatory)]"
    );
}

#[test]
#[should_panic(expected = "scanner and dialect disagree")]
fn analyze_panics_on_count_mismatch() {
    let compiler = FakeCompiler::new().accept("(a)", 2);
    analyze("(a)", false, &compiler);
}

#[test]
fn analyze_honours_verbose_flag() {
    let compiler = FakeCompiler::new();
    let pattern = indoc! {r"
        (?P<key>\w+)   # the key
        \s* = \s*
        (?P<value>\w+)?
    "};
    insta::assert_snapshot!(
        render(&analyze(pattern, true, &compiler)),
        @"[(key, mandatory), (value, optional)]"
    );
}

#[test]
fn analyzer_memoizes_per_key() {
    let analyzer = PatternAnalyzer::new(AnalyzerConfig::default(), FakeCompiler::new());

    let first = analyzer.analyze("(a)|b", false);
    let second = analyzer.analyze("(a)|b", false);
    assert_eq!(first, second);
    assert_eq!(analyzer.compiler().calls(), 1);

    analyzer.analyze("(a)|b", true);
    assert_eq!(analyzer.compiler().calls(), 2);
    assert_eq!(analyzer.memo().len(), 2);
}

#[test]
fn analyzer_respects_cache_limit() {
    let analyzer = PatternAnalyzer::new(AnalyzerConfig::new().cache_limit(1), FakeCompiler::new());

    analyzer.analyze("a", false);
    analyzer.analyze("b", false);
    analyzer.analyze("a", false);
    assert_eq!(analyzer.compiler().calls(), 3);
    assert_eq!(analyzer.memo().len(), 1);
}

#[test]
fn call_with_literal_and_no_flags_is_refined() {
    let analyzer = PatternAnalyzer::default();
    let mut diagnostics = Diagnostics::new();

    let groups = refined(analyzer.analyze_call(&CallSite::literal("(a)(b)?"), &mut diagnostics));
    insta::assert_snapshot!(groups, @"[(_, mandatory), (_, optional)]");
    assert!(diagnostics.is_empty());
}

#[test]
fn call_with_verbose_flags_is_refined() {
    let analyzer = PatternAnalyzer::default();
    let mut diagnostics = Diagnostics::new();
    let flags = FlagExpr::parse("re.I | re.VERBOSE").unwrap();

    let site = CallSite::literal("(a) # (b)").flags(&flags);
    let groups = refined(analyzer.analyze_call(&site, &mut diagnostics));
    insta::assert_snapshot!(groups, @"[(_, mandatory)]");
}

#[test]
fn call_abstains_silently() {
    let analyzer = PatternAnalyzer::new(AnalyzerConfig::default(), FakeCompiler::new());
    let mut diagnostics = Diagnostics::new();

    assert_eq!(
        analyzer.analyze_call(&CallSite::dynamic(), &mut diagnostics),
        CallOutcome::Unrefined
    );

    let flags = FlagExpr::parse("re.I | user_flags").unwrap();
    let site = CallSite::literal("(").flags(&flags);
    assert_eq!(
        analyzer.analyze_call(&site, &mut diagnostics),
        CallOutcome::Unrefined
    );

    assert!(diagnostics.is_empty());
    assert_eq!(analyzer.compiler().calls(), 0);
}

#[test]
fn call_with_invalid_pattern_reports_at_pattern() {
    let compiler = FakeCompiler::new().reject("(a", "missing ), unterminated subpattern");
    let analyzer = PatternAnalyzer::new(AnalyzerConfig::default(), compiler);
    let mut diagnostics = Diagnostics::new();

    let site = CallSite::literal("(a").span(10..14);
    assert_eq!(analyzer.analyze_call(&site, &mut diagnostics), CallOutcome::Error);
    insta::assert_snapshot!(
        diagnostics.render(r#"re.search("(a", text)"#),
        @r#"
    error: missing ), unterminated subpattern
      |
    1 | re.search("(a", text)
      |           ^^^^
    "#
    );
}

#[test]
fn resolve_verbose_uses_config() {
    let analyzer = PatternAnalyzer::new(
        AnalyzerConfig::new().flags_module("regex"),
        FakeCompiler::new(),
    );
    let flags = FlagExpr::name("regex.X");
    assert_eq!(analyzer.resolve_verbose(Some(&flags)), VerboseResolution::On);
    assert_eq!(analyzer.resolve_verbose(None), VerboseResolution::Off);
    assert_eq!(analyzer.config().flags_module, "regex");
}

#[test]
fn groups_from_flag_source() {
    let analyzer = PatternAnalyzer::default();

    let groups = analyzer.groups("(a)#(b)", Some("re.X")).unwrap().unwrap();
    insta::assert_snapshot!(groups, @"[(_, mandatory)]");

    let groups = analyzer.groups("(a)#(b)", None).unwrap().unwrap();
    insta::assert_snapshot!(groups, @"[(_, mandatory), (_, mandatory)]");

    assert_eq!(analyzer.groups("(a)", Some("get_flags()")).unwrap(), None);
}

#[test]
fn groups_errors() {
    let analyzer = PatternAnalyzer::new(
        AnalyzerConfig::default(),
        FakeCompiler::new().reject("(", "unterminated"),
    );

    let err = analyzer.groups("(", None).unwrap_err();
    assert!(matches!(err, Error::Pattern(_)));
    insta::assert_snapshot!(err, @"unterminated");

    let err = analyzer.groups("()", Some("re.X | @")).unwrap_err();
    assert!(matches!(err, Error::FlagsSyntax(_)));
    insta::assert_snapshot!(err, @r#"invalid flags expression: unexpected character: "@" at 7..8"#);
}

#[test]
fn lookup_groups() {
    let analyzer = PatternAnalyzer::default();
    let pattern = "(?P<y>a)(b)?";

    assert_eq!(analyzer.lookup(pattern, &GroupRef::Index(0)).unwrap(), Presence::Definite);
    assert_eq!(analyzer.lookup(pattern, &"y".into()).unwrap(), Presence::Definite);
    assert_eq!(analyzer.lookup(pattern, &GroupRef::Index(2)).unwrap(), Presence::MaybeAbsent);

    let err = analyzer.lookup(pattern, &GroupRef::Index(3)).unwrap_err();
    insta::assert_snapshot!(err, @"no such group: 3");
    let err = analyzer.lookup(pattern, &"z".into()).unwrap_err();
    insta::assert_snapshot!(err, @"no such group: 'z'");

    let err = analyzer.lookup("(", &GroupRef::Index(1)).unwrap_err();
    assert!(matches!(err, Error::Pattern(_)));
}
