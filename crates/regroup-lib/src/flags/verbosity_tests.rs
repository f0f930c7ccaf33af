use regroup_core::VerboseResolution::{self, Off, On, Unknown};

use super::*;
use crate::config::AnalyzerConfig;

fn resolve(input: &str) -> VerboseResolution {
    let expr = FlagExpr::parse(input).unwrap();
    resolve_verbose(Some(&expr), &AnalyzerConfig::default())
}

#[test]
fn absent_flags_are_off() {
    assert_eq!(resolve_verbose(None, &AnalyzerConfig::default()), Off);
}

#[test]
fn verbose_constants() {
    assert_eq!(resolve("re.X"), On);
    assert_eq!(resolve("re.VERBOSE"), On);
    assert_eq!(resolve("re.RegexFlag.X"), On);
    assert_eq!(resolve("re.RegexFlag.VERBOSE"), On);
}

#[test]
fn other_constants_are_off() {
    assert_eq!(resolve("re.I"), Off);
    assert_eq!(resolve("re.IGNORECASE"), Off);
    assert_eq!(resolve("re.RegexFlag.M"), Off);
}

#[test]
fn foreign_names_are_unknown() {
    assert_eq!(resolve("flags"), Unknown);
    assert_eq!(resolve("X"), Unknown);
    assert_eq!(resolve("regex.X"), Unknown);
    assert_eq!(resolve("config.re.X"), Unknown);
}

#[test]
fn unions() {
    assert_eq!(resolve("re.I | re.X"), On);
    assert_eq!(resolve("re.I | re.M"), Off);
    assert_eq!(resolve("re.I | flags"), Unknown);
    assert_eq!(resolve("flags | re.X"), On);
    assert_eq!(resolve("re.X | compute()"), On);
    assert_eq!(resolve("(re.I | re.S) | (re.M | re.VERBOSE)"), On);
}

#[test]
fn integer_literals_test_the_verbose_bit() {
    assert_eq!(resolve("64"), On);
    assert_eq!(resolve("0x42"), On);
    assert_eq!(resolve("2"), Off);
    assert_eq!(resolve("0"), Off);
    assert_eq!(resolve("2 | re.X"), On);
}

#[test]
fn opaque_is_unknown() {
    assert_eq!(resolve("make_flags()"), Unknown);
    assert_eq!(resolve("re.X & re.I"), Unknown);
}

#[test]
fn follows_configured_module_and_names() {
    let config = AnalyzerConfig::new()
        .flags_module("regex")
        .verbose_flag_names(["V"])
        .verbose_bit(8);
    let resolve = |input: &str| {
        let expr = FlagExpr::parse(input).unwrap();
        resolve_verbose(Some(&expr), &config)
    };
    assert_eq!(resolve("regex.V"), On);
    assert_eq!(resolve("regex.X"), Off);
    assert_eq!(resolve("re.X"), Unknown);
    assert_eq!(resolve("8"), On);
    assert_eq!(resolve("64"), Off);
}
