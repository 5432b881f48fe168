use shorthand::{Rule, RuleSet, parse};

#[test]
fn parse_field_definitions() {
    let rules = RuleSet::from_shorthand("required|min:6").unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules.has_rule("required"));
    assert_eq!(rules.get_rule("min").unwrap().parameters(), ["6"]);
}

#[test]
fn parse_choice_list() {
    let rules = parse("required|in:red,green,blue").unwrap();
    let choice = rules.get_rule("in").unwrap();
    assert_eq!(choice.parameters(), ["red", "green", "blue"]);
    assert_eq!(choice.parameter(2).unwrap(), "blue");
}

#[test]
fn parse_regex_parameter_keeps_colons_and_pipes_end_it() {
    let rules = parse("regex:/^a:b$/|string").unwrap();
    assert_eq!(rules.get_rule("regex").unwrap().parameters(), ["/^a:b$/"]);
    assert!(rules.has_rule("string"));
}

#[test]
fn parse_matches_builder() {
    let parsed = parse("integer|between:10,20|required").unwrap();
    let built = RuleSet::new()
        .with_rule(Rule::new("integer"))
        .with_rule(Rule::with_parameters("between", ["10", "20"]))
        .with_rule(Rule::new("required"));
    assert_eq!(parsed, built);
}

#[test]
fn display_round_trips_shorthand() {
    for input in [
        "required",
        "required|email",
        "integer|between:10,20",
        "date_format:Y-m-d H:i:s|nullable",
        "min:",
        "in:a,,b",
    ] {
        assert_eq!(parse(input).unwrap().to_string(), input);
    }
}

#[test]
fn parse_empty_parameters_inside_list() {
    let rules = parse("in:a,,b").unwrap();
    assert_eq!(rules.get_rule("in").unwrap().parameters(), ["a", "", "b"]);
}

#[test]
fn parse_error_reports_input() {
    let err = parse("required||min:6").unwrap_err();
    assert_eq!(err.input(), "required||min:6");
    assert!(err.to_string().starts_with("parse error in 'required||min:6'"));
}

#[test]
fn parse_rejects_missing_names() {
    for input in ["|", "||", ":1", "a|:1", "a|"] {
        assert!(parse(input).is_err(), "expected {input:?} to fail");
    }
}

#[test]
fn parse_accepts_unicode_names_and_parameters() {
    let rules = parse("in:café,naïve|größe").unwrap();
    assert_eq!(rules.get_rule("in").unwrap().parameters(), ["café", "naïve"]);
    assert!(rules.has_rule("größe"));
}
