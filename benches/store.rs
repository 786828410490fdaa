use std::sync::Arc;

use artnet_in::{ArtDmx, ChannelStore, DmxQuery};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    let store = ChannelStore::new();

    let full = ArtDmx::new(0, 1, vec![0u8; 512]);
    group.throughput(Throughput::Bytes(512));
    group.bench_function("update_512ch", |b| {
        b.iter(|| {
            black_box(store.update(&full));
        });
    });

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let store = Arc::new(ChannelStore::new());
    store.update(&ArtDmx::new(0, 1, vec![128u8; 512]));
    let query = DmxQuery::new(store, 0);

    group.bench_function("dmx", |b| {
        b.iter(|| {
            black_box(query.dmx(black_box(100)));
        });
    });

    group.bench_function("dmxf", |b| {
        b.iter(|| {
            black_box(query.dmxf(black_box(100)));
        });
    });

    group.bench_function("dmx_no_signal", |b| {
        query.set_active_universe(7);
        b.iter(|| {
            black_box(query.dmx(black_box(100)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_update, bench_query);
criterion_main!(benches);
