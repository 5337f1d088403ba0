//! Benchmarks for book throughput: resting submissions, pro-rata crossing,
//! and cancellation.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use prorata_lob::{Book, OrderRequest, Side};

/// Non-crossing order flow: bids below 1000, asks above.
fn create_resting_requests(count: usize) -> Vec<OrderRequest> {
    let mut requests = Vec::with_capacity(count);

    for i in 0..count {
        let id = (i + 1) as u64;
        let is_bid = i % 2 == 0;
        let price_offset = (i % 10) as i32;

        let (side, price) = if is_bid {
            (Side::Bid, 999 - price_offset)
        } else {
            (Side::Ask, 1001 + price_offset)
        };

        requests.push(OrderRequest::new(
            id,
            format!("t{}", i % 16),
            "SYM",
            side,
            ((i % 100) + 1) as i32,
            price,
        ));
    }

    requests
}

fn bench_submission(c: &mut Criterion) {
    let requests = create_resting_requests(10_000);

    let mut group = c.benchmark_group("submission");
    group.throughput(Throughput::Elements(requests.len() as u64));

    group.bench_function("rest_orders", |b| {
        b.iter(|| {
            let mut book = Book::new("SYM");
            for request in &requests {
                let _ = black_box(book.submit(request.clone()));
            }
        })
    });

    group.finish();
}

fn bench_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossing");

    // One aggressor pro-rata split across a deep level.
    group.bench_function("pro_rata_100_resting", |b| {
        b.iter(|| {
            let mut book = Book::new("SYM");
            for i in 0..100u64 {
                book.submit(OrderRequest::sell(
                    i + 1,
                    format!("t{i}"),
                    "SYM",
                    ((i % 50) + 1) as i32,
                    1000,
                ))
                .unwrap();
            }
            let trades = book
                .submit(OrderRequest::buy(1000, "agg", "SYM", 800, 1000))
                .unwrap();
            black_box(trades)
        })
    });

    // One aggressor sweeping through ten price levels.
    group.bench_function("sweep_10_levels", |b| {
        b.iter(|| {
            let mut book = Book::new("SYM");
            for i in 0..10u64 {
                book.submit(OrderRequest::sell(
                    i + 1,
                    format!("t{i}"),
                    "SYM",
                    50,
                    1000 + i as i32,
                ))
                .unwrap();
            }
            let trades = book
                .submit(OrderRequest::buy(1000, "agg", "SYM", 500, 1009))
                .unwrap();
            black_box(trades)
        })
    });

    group.finish();
}

fn bench_cancel(c: &mut Criterion) {
    let requests = create_resting_requests(1_000);

    let mut group = c.benchmark_group("cancel");
    group.throughput(Throughput::Elements(requests.len() as u64));

    group.bench_function("rest_then_cancel_all", |b| {
        b.iter(|| {
            let mut book = Book::new("SYM");
            for request in &requests {
                book.submit(request.clone()).unwrap();
            }
            for request in &requests {
                black_box(book.cancel(request.id));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_submission, bench_crossing, bench_cancel);
criterion_main!(benches);
