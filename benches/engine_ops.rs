use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

use rust_2584::agents::{Agent, RandomEnvironment};
use rust_2584::core::{Board, Direction, Variant};
use rust_2584::ntuple::{NTupleNetwork, SamplingPlan};

fn corpus() -> Vec<Board> {
    let mut env = RandomEnvironment::new(42);
    let mut boards = Vec::new();
    let mut board = Board::default();
    for _ in 0..2 {
        env.take_action(&board).apply(&mut board, Variant::Fibonacci);
    }
    boards.push(board);

    // Cycle the directions to get a spread of densities
    for i in 0..40 {
        let direction = Direction::ALL[i % 4];
        if board.slide(direction, Variant::Fibonacci).is_some() {
            env.take_action(&board).apply(&mut board, Variant::Fibonacci);
        }
        boards.push(board);
    }
    boards
}

fn bench_slide(c: &mut Criterion) {
    let boards = corpus();
    for direction in Direction::ALL {
        c.bench_function(&format!("slide/{direction}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for board in &boards {
                    if let Some((_, reward)) = board.after(direction, Variant::Fibonacci) {
                        acc += reward;
                    }
                }
                black_box(acc)
            })
        });
    }
}

fn bench_network(c: &mut Criterion) {
    let boards = corpus();

    let network = NTupleNetwork::new(SamplingPlan::rows(), 16);
    c.bench_function("network/value_rows", |bch| {
        bch.iter(|| boards.iter().map(|b| network.value(b)).sum::<f32>())
    });

    let network = NTupleNetwork::new(SamplingPlan::rows_and_axes(), 12);
    c.bench_function("network/value_rows_and_axes", |bch| {
        bch.iter(|| boards.iter().map(|b| network.value(b)).sum::<f32>())
    });

    c.bench_function("network/update_rows", |bch| {
        bch.iter_batched(
            || NTupleNetwork::new(SamplingPlan::rows(), 16),
            |mut network| {
                for board in &boards {
                    black_box(network.update(board, 0.01));
                }
                network
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_slide, bench_network);
criterion_main!(benches);
