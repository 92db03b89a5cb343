//! Rule engine throughput: single estimates, full catalog sweeps and results
//! assembly.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use damage_aid::classifier::AnalysisRecord;
use damage_aid::data::catalog::{DamageType, Severity};
use damage_aid::data::profile::Profile;
use damage_aid::engine::{build_results, estimate, estimate_cost_for, match_budget};

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(100);

    group.throughput(Throughput::Elements(1));
    group.bench_function("estimate_water_severe", |b| {
        b.iter(|| black_box(estimate(black_box("Water Damage"), "Severe", Some("$10,000"))))
    });

    // Every damage type and severity in one pass
    let pairs = DamageType::ALL.len() * Severity::ALL.len();
    group.throughput(Throughput::Elements(pairs as u64));
    group.bench_function("cost_sweep", |b| {
        b.iter(|| {
            let mut total = 0u64;
            for damage in DamageType::ALL {
                for severity in Severity::ALL {
                    total += u64::from(estimate_cost_for(damage, severity));
                }
            }
            black_box(total)
        })
    });

    group.throughput(Throughput::Elements(1));
    group.bench_function("match_budget_range_label", |b| {
        b.iter(|| black_box(match_budget(black_box(7_500), "$5,000 - $10,000")))
    });

    let profile = Profile {
        name: "Bench".to_string(),
        address: "1 Bench Way".to_string(),
        budget: "$50,000+".to_string(),
        consent: true,
    };
    let record = AnalysisRecord {
        damage_type: "Flooding".to_string(),
        severity: "Moderate".to_string(),
        confidence: "92.4%".to_string(),
    };
    group.bench_function("build_results", |b| {
        b.iter(|| black_box(build_results(Some(&profile), 4, &record)))
    });

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
