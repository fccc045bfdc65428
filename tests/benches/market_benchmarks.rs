//! Criterion benchmarks for the hot paths of a listing load.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shared_types::ListingId;
use sm_01_contract_store::abi::{self, signatures};
use sm_01_contract_store::InMemoryContractStore;
use sm_02_listing_index::domain::{decode_index, encode_index, encode_record, record_key};
use sm_02_listing_index::test_utils::record_at;
use sm_02_listing_index::{ListingProjector, INDEX_KEY};

fn bench_abi(c: &mut Criterion) {
    let value = vec![0x7bu8; 512];
    c.bench_function("abi_encode_set_data_512b", |b| {
        b.iter(|| abi::encode_call(signatures::SET_DATA, &[&b"listing_keys"[..], black_box(value.as_slice())]))
    });

    let encoded = abi::encode_bytes_return(&value);
    c.bench_function("abi_decode_bytes_512b", |b| {
        b.iter(|| abi::decode_bytes(black_box(&encoded)))
    });
}

fn bench_index_codec(c: &mut Criterion) {
    let ids: Vec<ListingId> = (0..1_000)
        .map(|i| ListingId::new(format!("{}-abcdefg", 1_700_000_000_000u64 + i)))
        .collect();
    let bytes = encode_index(&ids).unwrap_or_default();
    c.bench_function("decode_index_1000", |b| {
        b.iter(|| decode_index(black_box(&bytes)))
    });
}

fn bench_projection(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("load_all");

    for size in [10u64, 100, 1_000] {
        let store = Arc::new(InMemoryContractStore::new());
        let ids: Vec<ListingId> = (0..size).map(|i| ListingId::new(i.to_string())).collect();
        for (i, id) in ids.iter().enumerate() {
            let record = encode_record(&record_at(i as u64)).unwrap_or_default();
            store.insert_raw(record_key(id), record);
        }
        store.insert_raw(INDEX_KEY, encode_index(&ids).unwrap_or_default());
        let projector = ListingProjector::new(store);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| rt.block_on(projector.load_all()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_abi, bench_index_codec, bench_projection);
criterion_main!(benches);
