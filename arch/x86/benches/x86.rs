use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use opinfo_x86::{decode, op_code_infos, try_build_table, Code};

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(Code::count() as u64));
    group.bench_function("records", |b| {
        b.iter(|| {
            let mut count = 0;
            for code in Code::values() {
                if decode(code, black_box(code.packed())).is_ok() {
                    count += 1;
                }
            }
            count
        })
    });
    group.bench_function("table", |b| b.iter(|| try_build_table().map(|i| i.len())));
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let infos = op_code_infos();
    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(infos.len() as u64));
    group.bench_function("modes", |b| {
        b.iter(|| {
            infos
                .iter()
                .filter(|i| i.is_available_in_mode(black_box(64)) == Ok(true))
                .count()
        })
    });
    group.bench_function("op_kinds", |b| {
        b.iter(|| {
            infos
                .iter()
                .flat_map(|i| (0..i.op_count()).filter_map(move |n| i.op_kind(n).ok()))
                .filter(|i| i.can_be_memory())
                .count()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_query);
criterion_main!(benches);
