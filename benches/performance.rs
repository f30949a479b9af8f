use criterion::{black_box, criterion_group, criterion_main, Criterion};
use logmigrate::core::generator::extract_fragments;
use logmigrate::core::{LogMigrator, PatchPlan};
use logmigrate::MigrationConfig;
use std::fmt::Write as _;

fn benchmark_migration(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_migration");

    let base = std::env::temp_dir().join("logmigrate_bench");
    let packages = ["hadoop-common", "hadoop-hdfs", "hadoop-mapreduce-client-core"];
    for package in packages {
        std::fs::create_dir_all(
            base.join("modules")
                .join(package)
                .join("src/main/java/org/apache/hadoop"),
        )
        .unwrap();
    }

    // Synthetic export: every package has 20 files with 10 call-sites each
    let mut export = String::new();
    for package in packages {
        writeln!(export, "{}{} (200 usages)", " ".repeat(12), package).unwrap();
        writeln!(export, "{}org.apache.hadoop.util (200 usages)", " ".repeat(16)).unwrap();
        for file in 0..20 {
            writeln!(export, "{}Worker{}.java (10 usages)", " ".repeat(20), file).unwrap();
            for call in 0..10 {
                let legacy = format!("LOG.info(\"Processed item {}\" + item{});", call, call);
                writeln!(export, "{}({}: 9) {}", " ".repeat(24), call * 10 + 1, legacy).unwrap();
                writeln!(export, "{}{}", " ".repeat(28), legacy).unwrap();
            }
        }
    }

    let config = MigrationConfig::default().with_base_path(&base);

    group.bench_function("export_600_calls", |b| {
        b.iter(|| {
            let migrator = LogMigrator::new(&config);
            let mut plan = PatchPlan::new();
            let report = migrator.migrate_reader(black_box(export.as_bytes()), &mut plan);
            black_box(report)
        });
    });

    group.bench_function("extract_fragments", |b| {
        b.iter(|| extract_fragments(black_box(r#"LOG.info("User logged in" + userId);"#)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_migration);
criterion_main!(benches);
