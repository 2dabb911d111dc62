//! Benchmarks for Meridian graph and rendezvous operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use meridian_core::Strategy;
use meridian_test::Bed;
use meridian_wire::RequestType;

fn bench_publish_unpublish_item(c: &mut Criterion) {
    let mut bed = Bed::new();
    bed.apply(0xA, RequestType::PublishScope, &[1], &[], Strategy::DomainLocal);

    c.bench_function("publish_unpublish_item", |b| {
        b.iter(|| {
            bed.apply(
                0xA,
                RequestType::PublishInfo,
                black_box(&[2]),
                &[1],
                Strategy::DomainLocal,
            );
            bed.apply(
                0xA,
                RequestType::UnpublishInfo,
                black_box(&[2]),
                &[1],
                Strategy::DomainLocal,
            );
            bed.drain();
        })
    });
}

fn bench_rendezvous_fanout(c: &mut Criterion) {
    // one item, many subscribers along the ancestor path
    let mut bed = Bed::new();
    bed.apply(0xA, RequestType::PublishScope, &[1], &[], Strategy::DomainLocal);
    for i in 0..64u64 {
        bed.apply(
            0x100 + i,
            RequestType::SubscribeScope,
            &[1],
            &[],
            Strategy::DomainLocal,
        );
    }
    bed.drain();

    c.bench_function("rendezvous_fanout_64_subscribers", |b| {
        b.iter(|| {
            bed.apply(
                0xA,
                RequestType::PublishInfo,
                black_box(&[2]),
                &[1],
                Strategy::DomainLocal,
            );
            bed.drain();
        })
    });
}

fn bench_deep_graph_subscribe(c: &mut Criterion) {
    // a chain of nested scopes with an item at the bottom
    let mut bed = Bed::new();
    bed.apply(0xA, RequestType::PublishScope, &[1], &[], Strategy::DomainLocal);
    let mut prefix = vec![1u64];
    for depth in 2..=16u64 {
        bed.apply(
            0xA,
            RequestType::PublishScope,
            &[depth],
            &prefix,
            Strategy::DomainLocal,
        );
        prefix.push(depth);
    }
    bed.apply(0xA, RequestType::PublishInfo, &[99], &prefix, Strategy::DomainLocal);
    bed.drain();

    c.bench_function("subscribe_item_under_deep_chain", |b| {
        b.iter(|| {
            bed.apply(
                0xB,
                RequestType::SubscribeInfo,
                black_box(&[99]),
                &prefix,
                Strategy::DomainLocal,
            );
            bed.apply(
                0xB,
                RequestType::UnsubscribeInfo,
                black_box(&[99]),
                &prefix,
                Strategy::DomainLocal,
            );
            bed.drain();
        })
    });
}

criterion_group!(
    benches,
    bench_publish_unpublish_item,
    bench_rendezvous_fanout,
    bench_deep_graph_subscribe,
);
criterion_main!(benches);
