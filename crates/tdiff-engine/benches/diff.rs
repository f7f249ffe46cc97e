use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tdiff_engine::{cleanup_semantic, diff, Deadline};

fn document(lines: usize, changed_every: usize, tag: &str) -> String {
    (0..lines)
        .map(|i| {
            if changed_every > 0 && i % changed_every == 0 {
                format!("{tag} line {i}: the quick brown fox jumps over the lazy dog\n")
            } else {
                format!("line {i}: the quick brown fox jumps over the lazy dog\n")
            }
        })
        .collect()
}

fn bench_character_mode(c: &mut Criterion) {
    let old = document(200, 7, "old");
    let new = document(200, 5, "new");
    c.bench_function("diff/chars", |b| {
        b.iter(|| diff(black_box(&old), black_box(&new), false, Deadline::none()))
    });
}

fn bench_line_mode(c: &mut Criterion) {
    let old = document(2000, 7, "old");
    let new = document(2000, 5, "new");
    c.bench_function("diff/lines", |b| {
        b.iter(|| diff(black_box(&old), black_box(&new), true, Deadline::none()))
    });
}

fn bench_semantic_cleanup(c: &mut Criterion) {
    let old = document(200, 3, "old");
    let new = document(200, 4, "new");
    let script = diff(&old, &new, false, Deadline::none());
    c.bench_function("cleanup/semantic", |b| {
        b.iter(|| {
            let mut s = script.clone();
            cleanup_semantic(black_box(&mut s));
            s
        })
    });
}

criterion_group!(benches, bench_character_mode, bench_line_mode, bench_semantic_cleanup);
criterion_main!(benches);
