/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/


use criterion::{criterion_group, criterion_main};

criterion_group!(
    benches,
    matching_bench::bench_rest_limit_orders,
    matching_bench::bench_market_sweep,
    matching_bench::bench_sequenced_throughput,
);
criterion_main!(benches);
