//! Benchmarks for the sequenced order book.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use seqbook::engine::{EngineConfig, NoopHandler, OrderBook};
use seqbook::types::{OrderClass, OrderFlags, Side};

// ============================================================================
// HELPER FUNCTIONS - Deterministic book setup
// ============================================================================

const BASE_PRICE: u64 = 5_000_000_000_000;
const TICK: u64 = 100_000_000;

/// A book plus the token its next command must carry.
struct Bench {
    book: OrderBook<NoopHandler>,
    token: u64,
    next_id: u64,
}

impl Bench {
    fn new(capacity: usize) -> Self {
        let config = EngineConfig::default().with_order_capacity(capacity);
        Self {
            book: OrderBook::with_config(NoopHandler, config),
            token: 0,
            next_id: 1,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place(&mut self, class: OrderClass, side: Side, quantity: u64, price: u64, trig_price: u64, flags: OrderFlags) -> u64 {
        self.token += 1;
        let id = self.next_id;
        self.next_id += 1;
        self.book
            .place_order(self.token, id, class, side, quantity, price, trig_price, flags);
        id
    }

    fn limit(&mut self, side: Side, quantity: u64, price: u64) -> u64 {
        self.place(OrderClass::Limit, side, quantity, price, 0, OrderFlags::empty())
    }

    fn cancel(&mut self, id: u64) {
        self.token += 1;
        self.book.cancel_order(self.token, id);
    }

    /// `count` asks at increasing prices from `BASE_PRICE`.
    fn populate_asks(&mut self, count: usize, step: u64, quantity: u64) {
        for i in 0..count as u64 {
            self.limit(Side::Sell, quantity, BASE_PRICE + i * step);
        }
    }

    /// `count` bids at decreasing prices below `BASE_PRICE`.
    fn populate_bids(&mut self, count: usize, step: u64, quantity: u64) {
        for i in 1..=count as u64 {
            self.limit(Side::Buy, quantity, BASE_PRICE - i * step);
        }
    }
}

/// Random limit orders around `BASE_PRICE`: (side, quantity, price).
fn generate_order_batch(count: usize, seed: u64) -> Vec<(Side, u64, u64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let offset: i64 = rng.gen_range(-50_000_000_000i64..=50_000_000_000i64);
            let price = (BASE_PRICE as i64 + offset) as u64;
            let quantity: u64 = rng.gen_range(1_000_000..=100_000_000);
            (side, quantity, price)
        })
        .collect()
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || {
                let mut bench = Bench::new(2_000);
                bench.populate_asks(1_000, TICK, TICK);
                bench
            },
            |mut bench| {
                bench.limit(Side::Buy, TICK, BASE_PRICE);
                black_box(bench.book.last_price())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut bench = Bench::new(200);
                bench.populate_asks(100, TICK, 10_000_000);
                bench
            },
            |mut bench| {
                bench.limit(Side::Buy, TICK, BASE_PRICE + 10 * TICK);
                black_box(bench.book.ask_levels())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || {
                let mut bench = Bench::new(2_000);
                bench.populate_asks(1_000, TICK, TICK);
                bench
            },
            |mut bench| {
                bench.limit(Side::Buy, TICK, BASE_PRICE - 100 * TICK);
                black_box(bench.book.order_count())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order Operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("add_to_1k_book", |b| {
        b.iter_batched(
            || {
                let mut bench = Bench::new(2_000);
                bench.populate_asks(500, TICK, TICK);
                bench.populate_bids(500, TICK, TICK);
                bench
            },
            |mut bench| black_box(bench.limit(Side::Buy, TICK, BASE_PRICE - 1_000 * TICK)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_order", |b| {
        b.iter_batched(
            || {
                let mut bench = Bench::new(2_000);
                bench.populate_bids(1_000, TICK, TICK);
                bench
            },
            |mut bench| {
                bench.cancel(500);
                black_box(bench.book.order_count())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Trigger Cascade
// ============================================================================

fn bench_trigger_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger_cascade");
    group.measurement_time(Duration::from_secs(5));

    for pending in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("stop_sells", pending), &pending, |b, &pending| {
            b.iter_batched(
                || {
                    let mut bench = Bench::new(pending * 3);
                    bench.populate_bids(pending * 2, TICK, TICK);
                    bench.populate_asks(1, TICK, TICK);
                    bench.limit(Side::Sell, TICK, BASE_PRICE - TICK);
                    for _ in 0..pending {
                        bench.place(
                            OrderClass::Market,
                            Side::Sell,
                            TICK,
                            0,
                            BASE_PRICE - 2 * TICK,
                            OrderFlags::STOP_LOSS,
                        );
                    }
                    bench
                },
                |mut bench| {
                    bench.limit(Side::Sell, TICK, BASE_PRICE - 2 * TICK);
                    black_box(bench.book.pending_trigger_count())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(BenchmarkId::new("orders", batch_size), &batch_size, |b, &size| {
            let orders = generate_order_batch(size, 42);

            b.iter_batched(
                || Bench::new(size * 2),
                |mut bench| {
                    for &(side, quantity, price) in &orders {
                        bench.limit(side, quantity, price);
                    }
                    bench.book.order_count()
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: State Root
// ============================================================================

fn bench_state_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_root");

    group.bench_function("10k_resting", |b| {
        let mut bench = Bench::new(12_000);
        bench.populate_asks(5_000, 100_000, 10_000_000);
        bench.populate_bids(5_000, 100_000, 10_000_000);

        b.iter(|| black_box(bench.book.state_root()));
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_trigger_cascade,
    bench_throughput,
    bench_state_root
);

criterion_main!(benches);
