use criterion::{black_box, criterion_group, criterion_main, Criterion};
use persona_chat::postprocessing::{MarkerMode, ParseCache, ResponseParser};
use std::num::NonZeroUsize;

fn sample_response(steps: usize) -> String {
    let mut raw = String::from("Let me work through this.<br>");
    for i in 0..steps {
        raw.push_str(&format!(
            "Thought: step {} needs a lookup of the Answer key\nObservation: lookup {} returned a value<br>",
            i, i
        ));
    }
    raw.push_str("Answer: done");
    raw
}

fn parse_benchmark(c: &mut Criterion) {
    let raw = sample_response(20);
    let strict = ResponseParser::new(MarkerMode::Strict);
    let lenient = ResponseParser::new(MarkerMode::Lenient);

    c.bench_function("parse_strict_20_steps", |b| b.iter(|| strict.parse(black_box(&raw))));
    c.bench_function("parse_lenient_20_steps", |b| b.iter(|| lenient.parse(black_box(&raw))));

    let cache = ParseCache::new(strict, NonZeroUsize::new(64).unwrap());
    c.bench_function("parse_cached_20_steps", |b| {
        b.iter(|| cache.get_or_parse(black_box(&raw)))
    });
}

criterion_group!(benches, parse_benchmark);
criterion_main!(benches);
