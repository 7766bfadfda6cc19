use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::collections::VecDeque;
use unrolled_deque::Deque;

const N: usize = 10_000;

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_push_pop");
    group.throughput(Throughput::Elements(N as u64));

    group.bench_function("vec_deque", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..N {
                if i % 2 == 0 {
                    deque.push_back(i);
                } else {
                    deque.push_front(i);
                }
            }
            while let Some(x) = deque.pop_front() {
                black_box(x);
            }
        });
    });

    group.bench_function("unrolled_deque", |b| {
        b.iter(|| {
            let mut deque = Deque::new();
            for i in 0..N {
                if i % 2 == 0 {
                    deque.push_back(i);
                } else {
                    deque.push_front(i);
                }
            }
            while let Ok(x) = deque.pop_front() {
                black_box(x);
            }
        });
    });

    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_index");
    group.throughput(Throughput::Elements(1000));

    let std_deque: VecDeque<usize> = (0..N).collect();
    let deque: Deque<usize> = (0..N).collect();

    group.bench_function("vec_deque", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in (0..N).step_by(N / 1000) {
                sum += std_deque[i];
            }
            black_box(sum);
        });
    });

    group.bench_function("unrolled_deque", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in (0..N).step_by(N / 1000) {
                sum += deque[i];
            }
            black_box(sum);
        });
    });

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_iter");
    group.throughput(Throughput::Elements(N as u64));

    let std_deque: VecDeque<usize> = (0..N).collect();
    let deque: Deque<usize> = (0..N).collect();

    group.bench_function("vec_deque", |b| {
        b.iter(|| black_box(std_deque.iter().sum::<usize>()));
    });

    group.bench_function("unrolled_deque", |b| {
        b.iter(|| black_box(deque.iter().sum::<usize>()));
    });

    group.finish();
}

fn bench_middle_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_middle_insert");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("vec_deque", |b| {
        b.iter(|| {
            let mut deque: VecDeque<usize> = (0..N).collect();
            for i in 0..1000 {
                deque.insert(deque.len() / 2, i);
            }
            black_box(deque.len());
        });
    });

    group.bench_function("unrolled_deque", |b| {
        b.iter(|| {
            let mut deque: Deque<usize> = (0..N).collect();
            // Each insert lands just before the previous one, near the middle.
            let mut pos = deque.seek(N / 2).unwrap();
            for i in 0..1000 {
                pos = deque.insert(pos, i).unwrap();
            }
            black_box(deque.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_index, bench_iter, bench_middle_insert);
criterion_main!(benches);
