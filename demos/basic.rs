use shorthand::transform::StringToInt;
use shorthand::validate::NumericValue;
use shorthand::{Constraint, Document, FieldRule, FieldValidator, Predicate, RuleSet, Value, Violation};

// Only the numeric format is checked here; a real engine evaluates the rest.
fn numeric_only(path: &str, value: &Value, predicate: &Predicate) -> Vec<Violation> {
    fn has_numeric(p: &Predicate) -> bool {
        match p {
            Predicate::Leaf(Constraint::NumericFormat) => true,
            Predicate::All(children) => children.iter().any(has_numeric),
            Predicate::Optional(Some(inner)) | Predicate::Required(Some(inner)) => has_numeric(inner),
            _ => false,
        }
    }
    if has_numeric(predicate) {
        NumericValue::validate(path, value).into_iter().collect()
    } else {
        Vec::new()
    }
}

fn main() {
    // Resolve shorthand rules
    for input in ["required|email", "integer|between:10,20", "between:10,20", "required"] {
        let predicate = RuleSet::resolve_shorthand(input).expect("failed to resolve rules");
        println!("{input:<24} => {predicate}");
    }

    // Validate a document
    let validator = FieldValidator::new(numeric_only)
        .rule(
            "ids.0",
            FieldRule::from_shorthand("required|integer")
                .expect("failed to resolve rules")
                .with_transformer(StringToInt),
        )
        .rule(
            "price",
            FieldRule::from_shorthand("required|numeric").expect("failed to resolve rules"),
        );

    let doc = Document::new()
        .set("ids", Document::list(["42"]))
        .set("price", "01.5");

    match validator.validate(&doc) {
        Ok(report) => {
            println!("{report}");
            for violation in report.violations() {
                println!("  {violation}");
            }
            println!("output: {:?}", report.document());
        }
        Err(err) => println!("misconfigured: {err}"),
    }
}
