use cinejoin_exec::{
    JoinConfig, ProbeSchedule, hash_join, hash_join_with_config, partition_chunks, prefix_join,
    sort_merge_join,
};
use cinejoin_types::{CastRow, TitleRow};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const TITLE_ROWS: [i32; 2] = [4_096, 32_768];
const CASTS_PER_TITLE: i32 = 4;
const THREADS: [i32; 3] = [1, 4, 8];
const WORDS: [&str; 8] = ["The", "Star", "Night", "Return", "Lost", "City", "Of", "Dreams"];

#[derive(Clone, Debug)]
struct JoinFixture {
    cast: Vec<CastRow>,
    title: Vec<TitleRow>,
}

fn title_name(id: i32) -> String {
    let word = |shift: i32| WORDS[usize::try_from((id >> shift) & 7).unwrap_or(0)];
    format!("{} {} {}", word(0), word(3), word(6))
}

/// Key-sorted relations: every title has `CASTS_PER_TITLE` cast rows, and
/// every fourth cast note is a short prefix of some title.
fn build_fixture(titles: i32) -> JoinFixture {
    let title = (0..titles)
        .map(|title_id| TitleRow {
            title_id,
            title: title_name(title_id).as_str().into(),
            production_year: 1950 + title_id % 70,
            ..TitleRow::default()
        })
        .collect();
    let cast = (0..titles * CASTS_PER_TITLE)
        .map(|cast_id| {
            let movie_id = cast_id / CASTS_PER_TITLE;
            let note = if cast_id % 4 == 0 {
                let name = title_name(movie_id);
                name.split(' ').take(2).collect::<Vec<_>>().join(" ")
            } else {
                format!("(uncredited {cast_id})")
            };
            CastRow {
                cast_id,
                person_id: cast_id * 7,
                movie_id,
                note: note.as_str().into(),
                ..CastRow::default()
            }
        })
        .collect();
    JoinFixture { cast, title }
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_engines");
    group.sample_size(20);

    for titles in TITLE_ROWS {
        let fixture = build_fixture(titles);
        group.throughput(Throughput::Elements(
            u64::try_from(fixture.cast.len()).unwrap_or(u64::MAX),
        ));
        for threads in THREADS {
            let param = format!("{titles}x{threads}");
            group.bench_with_input(BenchmarkId::new("hash", &param), &fixture, |b, f| {
                b.iter(|| {
                    hash_join(&f.cast, &f.title, threads)
                        .expect("hash join")
                        .len()
                });
            });
            group.bench_with_input(BenchmarkId::new("sort_merge", &param), &fixture, |b, f| {
                b.iter(|| {
                    sort_merge_join(&f.cast, &f.title, threads)
                        .expect("sort-merge join")
                        .len()
                });
            });
            group.bench_with_input(BenchmarkId::new("prefix_trie", &param), &fixture, |b, f| {
                b.iter(|| {
                    prefix_join(&f.cast, &f.title, threads)
                        .expect("prefix join")
                        .len()
                });
            });
        }
    }

    group.finish();
}

fn bench_probe_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_probe_schedule");
    let fixture = build_fixture(TITLE_ROWS[1]);

    for schedule in [
        ProbeSchedule::Contiguous,
        ProbeSchedule::RoundRobinBlocks,
        ProbeSchedule::DynamicBlocks,
    ] {
        let config = JoinConfig::default().with_probe_schedule(schedule);
        group.bench_with_input(
            BenchmarkId::from_parameter(schedule.as_str()),
            &fixture,
            |b, f| {
                b.iter(|| {
                    hash_join_with_config(&f.cast, &f.title, 8, &config)
                        .expect("hash join")
                        .len()
                });
            },
        );
    }

    group.finish();
}

fn bench_partitioning(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_merge_partition");
    let fixture = build_fixture(TITLE_ROWS[1]);

    for cache_bytes in [32 * 1024, 256 * 1024, 2 * 1024 * 1024] {
        let budget = JoinConfig::default()
            .with_cache_bytes(cache_bytes)
            .chunk_budget();
        group.bench_with_input(
            BenchmarkId::from_parameter(cache_bytes),
            &fixture,
            |b, f| {
                b.iter(|| partition_chunks(&f.cast, &f.title, budget).len());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_engines,
    bench_probe_schedules,
    bench_partitioning
);
criterion_main!(benches);
