use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use genex::canonical::canonicalize;
use genex::parser::parse;
use genex::{Generator, Options, Registry};

// ============================================================================
// Test Data
// ============================================================================

const EXPRESSIONS: &[(&str, &str)] = &[
    ("numeric_range", "1-10"),
    ("char_range", "a-z"),
    ("literal", r#""hello""#),
    ("multiplier", "12*(char:a-z)"),
    ("canonical_nested", "repeat:2:(repeat:3:(char:a-z))"),
];

/// Builds `depth` levels of `2*(...)` around a character range.
fn nested_expression(depth: usize) -> String {
    let mut expression = String::from("a-z");
    for _ in 0..depth {
        expression = format!("2*({expression})");
    }
    expression
}

// ============================================================================
// Grammar Benchmarks
// ============================================================================

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    for (name, expression) in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(name), expression, |b, e| {
            b.iter(|| canonicalize(black_box(e)).len())
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, expression) in EXPRESSIONS {
        group.throughput(Throughput::Bytes(expression.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), expression, |b, e| {
            b.iter(|| parse(black_box(e)))
        });
    }
    group.finish();
}

// ============================================================================
// Generator Benchmarks
// ============================================================================

fn bench_construct(c: &mut Criterion) {
    let registry = Registry::builtin();
    let options = Options::new().with("seed", 1);
    let mut group = c.benchmark_group("construct_nesting");

    for depth in [1, 4, 8, 16] {
        let expression = nested_expression(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &expression, |b, e| {
            b.iter(|| Generator::new(black_box(e), &registry, &options).map(|g| g.is_async()))
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let registry = Registry::builtin();
    let options = Options::new().with("seed", 1);
    let mut group = c.benchmark_group("resolve");

    for (name, expression) in EXPRESSIONS {
        let mut generator = Generator::new(expression, &registry, &options).unwrap();
        group.bench_function(*name, |b| {
            b.iter(|| generator.resolve().map(|p| p.into_immediate()))
        });
    }
    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(grammar_benches, bench_canonicalize, bench_parse);
criterion_group!(generator_benches, bench_construct, bench_resolve);
criterion_main!(grammar_benches, generator_benches);
