//! End-to-end analysis against the `fancy-regex` compiler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use regroup_lib::{
    AnalysisOutcome, AnalyzerConfig, CallOutcome, CallSite, CompiledPattern, DiagnosticKind,
    Diagnostics, FancyRegexCompiler, PatternAnalyzer, PatternCompiler, PatternError,
};

fn groups(pattern: &str) -> String {
    groups_with(pattern, false)
}

fn groups_with(pattern: &str, verbose: bool) -> String {
    let analyzer = PatternAnalyzer::default();
    match analyzer.analyze(pattern, verbose).as_ref() {
        AnalysisOutcome::Groups(groups) => groups.to_string(),
        AnalysisOutcome::Invalid(err) => panic!("{pattern:?} rejected: {err}"),
    }
}

#[test]
fn empty_and_plain_groups() {
    insta::assert_snapshot!(groups(""), @"[]");
    insta::assert_snapshot!(groups("()"), @"[(_, mandatory)]");
    insta::assert_snapshot!(groups("(?:)"), @"[]");
    insta::assert_snapshot!(groups("(?m)"), @"[]");
}

#[test]
fn trailing_quantifiers() {
    insta::assert_snapshot!(groups("()?"), @"[(_, optional)]");
    insta::assert_snapshot!(groups("()*"), @"[(_, optional)]");
    insta::assert_snapshot!(groups("(())?"), @"[(_, optional), (_, optional)]");
    insta::assert_snapshot!(groups("(()?)"), @"[(_, mandatory), (_, optional)]");
    insta::assert_snapshot!(groups("()+"), @"[(_, mandatory)]");
}

#[test]
fn unterminated_group_is_the_compiler_error() {
    let analyzer = PatternAnalyzer::default();
    let outcome = analyzer.analyze("(", false);
    let expected = fancy_regex::Regex::new("(").unwrap_err().to_string();
    assert_eq!(outcome.error().map(|e| e.message.clone()), Some(expected));
}

#[test]
fn invalid_call_reports_compiler_message_verbatim() {
    let analyzer = PatternAnalyzer::default();
    let mut diagnostics = Diagnostics::new();
    let site = CallSite::literal("(").span(10..13);

    assert_eq!(analyzer.analyze_call(&site, &mut diagnostics), CallOutcome::Error);
    let diag = diagnostics.iter().next().unwrap();
    let expected = fancy_regex::Regex::new("(").unwrap_err().to_string();
    assert_eq!(diag.kind(), DiagnosticKind::InvalidPattern);
    assert_eq!(diag.message(), expected);
    assert_eq!(diag.range(), 10..13);
}

#[test]
fn character_classes_are_opaque() {
    insta::assert_snapshot!(groups("[()]"), @"[]");
    insta::assert_snapshot!(groups(r"[]\]()]"), @"[]");
    insta::assert_snapshot!(groups("[^]()]"), @"[]");
}

#[test]
fn named_groups_in_order() {
    insta::assert_snapshot!(
        groups("(?P<a>(?P<b>))(?P<c>(?P<d>)|(?P<e>)(?P<f>))"),
        @"[(a, mandatory), (b, mandatory), (c, mandatory), (d, optional), (e, optional), (f, optional)]"
    );
}

#[test]
fn lookaheads() {
    insta::assert_snapshot!(groups("(?!a(b)c)a"), @"[(_, optional)]");
    insta::assert_snapshot!(groups("(?=a(b)c)a"), @"[(_, mandatory)]");
}

#[test]
fn alternations() {
    insta::assert_snapshot!(groups("()|()"), @"[(_, optional), (_, optional)]");
    insta::assert_snapshot!(
        groups("(()|())"),
        @"[(_, mandatory), (_, optional), (_, optional)]"
    );
}

#[test]
fn comment_groups() {
    insta::assert_snapshot!(groups("(?#a)()"), @"[(_, mandatory)]");
    insta::assert_snapshot!(groups("(?#()()"), @"[(_, mandatory)]");
}

#[test]
fn inline_verbose_matches_verbose_flag() {
    insta::assert_snapshot!(groups("(?x)#()\n(?#()()?"), @"[(_, optional)]");
    insta::assert_snapshot!(groups_with("#()\n(?#()()?", true), @"[(_, optional)]");
}

#[test]
fn nested_classes_match_compiler() {
    insta::assert_snapshot!(groups("[[a]()]"), @"[]");
    insta::assert_snapshot!(groups("[a-z&&[^b]]()"), @"[(_, mandatory)]");
    insta::assert_snapshot!(groups("[[:alpha:]]()"), @"[(_, mandatory)]");
}

#[test]
fn group_count_agrees_with_compiler() {
    let corpus = [
        r"(\d+)-(\d+)",
        r"(?P<user>[\w.]+)@(?P<host>[\w.]+)",
        r"^(?:(a)|b(c)?)+$",
        r"(a)(?:(b)|(c))*(d)",
        r"\((x)\)",
        r"[(](y)[)]",
        r"(a){2,3}(b){0,1}(c){0,}",
        r"((a)|(b))|((c)(d))",
        r"(?i)(abc)(?-i:(def))",
        r"(?=(look))(?!(not))(m)",
        r"(?<year>\d{4})-(?<month>\d{2})",
        r"(a)\1",
        r"[[a]()]",
        r"[a-z&&[^b]]()",
        r"[[:alpha:]]()",
        r"(?U)(a+)(?imsx-U:(b))",
        "(a(?x))#(b)",
        "((?x)#(a)\n)(b)",
    ];
    let analyzer = PatternAnalyzer::default();
    for pattern in corpus {
        let outcome = analyzer.analyze(pattern, false);
        let compiled = FancyRegexCompiler.compile(pattern, false).unwrap();
        let groups = outcome.groups().unwrap();
        assert_eq!(groups.len(), compiled.group_count, "{pattern}");
    }
}

#[test]
fn memoized_calls_reach_compiler_once() {
    let calls = AtomicUsize::new(0);
    let counting = |pattern: &str, verbose: bool| -> Result<CompiledPattern, PatternError> {
        calls.fetch_add(1, Ordering::SeqCst);
        FancyRegexCompiler.compile(pattern, verbose)
    };
    let analyzer = PatternAnalyzer::new(AnalyzerConfig::default(), counting);

    let first = analyzer.analyze("(a)|(b)", false);
    let second = analyzer.analyze("(a)|(b)", false);
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    analyzer.analyze("(", false);
    analyzer.analyze("(", false);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn analyzer_is_shared_across_threads() {
    let analyzer = PatternAnalyzer::default();
    let patterns = ["(a)", "(a)|(b)", "(?P<x>a)?", "("];

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for pattern in patterns {
                    analyzer.analyze(pattern, false);
                }
            });
        }
    });

    assert_eq!(analyzer.memo().len(), patterns.len());
    assert!(!analyzer.analyze("(", false).is_valid());
}
