use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_arena::agents::CheckCallBot;
use holdem_arena::cards::parse_cards;
use holdem_arena::config::MatchConfig;
use holdem_arena::evaluator::{evaluate_cards, evaluate_five};
use holdem_arena::runner::MatchRunner;

fn five(s: &str) -> [holdem_arena::cards::Card; 5] {
    let v = parse_cards(s).unwrap();
    [v[0], v[1], v[2], v[3], v[4]]
}

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = five("Ah Kd 7s 5c 2d");
    let sf = five("As Ks Qs Js Ts");

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven = parse_cards("As Ah Ks Qs Js Ts 9s").unwrap();
    c.bench_function("evaluate_seven", |b| b.iter(|| evaluate_cards(black_box(&seven))));
}

fn bench_match(c: &mut Criterion) {
    c.bench_function("check_call_match_100", |b| {
        b.iter(|| {
            let mut runner = MatchRunner::new(Box::new(CheckCallBot), Box::new(CheckCallBot));
            runner.run(MatchConfig::default().with_rounds(100).with_seed(1)).unwrap()
        })
    });
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_match);
criterion_main!(benches);
