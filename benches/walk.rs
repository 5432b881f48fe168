use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shorthand::transform::StringToInt;
use shorthand::{
    Document, FieldRule, FieldValidator, Predicate, Value, Violation, WalkError, walk,
};

type Check = fn(&str, &Value, &Predicate) -> Vec<Violation>;

fn accept_all(_: &str, _: &Value, _: &Predicate) -> Vec<Violation> {
    Vec::new()
}

/// A document with `n` records, each a mapping of three leaves.
fn build_document(n: usize) -> Document {
    let records = (0..n).map(|i| {
        Document::new()
            .set("id", i.to_string())
            .set("name", format!("user{i}"))
            .set("email", format!("user{i}@example.test"))
    });
    Document::new().set("records", Document::list(records))
}

fn build_validator(n: usize) -> FieldValidator<Check> {
    let id = FieldRule::from_shorthand("required|integer|min:0")
        .unwrap()
        .with_transformer(StringToInt);
    let name = FieldRule::from_shorthand("required|string|max:64").unwrap();
    let email = FieldRule::from_shorthand("required|email").unwrap();

    let mut validator = FieldValidator::new(accept_all as Check);
    for i in 0..n {
        validator.insert(&format!("records.{i}.id"), id.clone());
        validator.insert(&format!("records.{i}.name"), name.clone());
        validator.insert(&format!("records.{i}.email"), email.clone());
    }
    validator
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    for &n in &[10, 100, 1000] {
        let doc = build_document(n);
        group.bench_function(format!("{n}_records_identity"), |b| {
            b.iter(|| {
                walk(black_box(&doc), &mut |_: &str, v: Value| -> Result<Value, WalkError> {
                    Ok(v)
                })
            });
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for &n in &[10, 100, 1000] {
        let doc = build_document(n);
        let validator = build_validator(n);
        group.bench_function(format!("{n}_records"), |b| {
            b.iter(|| validator.validate(black_box(&doc)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk, bench_validate);
criterion_main!(benches);
