use criterion::{black_box, criterion_group, criterion_main, Criterion};

use admission_core::model::{AssignmentResult, AssignmentType, CourseResults, StudentResults};
use admission_core::rules::{PassedXPercentWithAtLeastYPercentRule, RequiredPercentOverallRule};
use admission_core::traits::NoopObserver;
use admission_core::{evaluate, AdmissionCriteria, AdmissionEngine, RoundingPolicy};

fn make_criteria() -> AdmissionCriteria {
    AdmissionCriteria::empty()
        .with_rule(
            RequiredPercentOverallRule::new(
                AssignmentType::Homework,
                50.0,
                RoundingPolicy::UpNearestInteger,
            )
            .unwrap(),
        )
        .with_rule(
            RequiredPercentOverallRule::new(
                AssignmentType::Testat,
                50.0,
                RoundingPolicy::Decimals { decimals: 1 },
            )
            .unwrap(),
        )
        .with_rule(
            PassedXPercentWithAtLeastYPercentRule::new(
                AssignmentType::Homework,
                40.0,
                RoundingPolicy::None,
                70.0,
                RoundingPolicy::DownNearestInteger,
            )
            .unwrap(),
        )
}

fn make_results(n: usize, seed: usize) -> Vec<AssignmentResult> {
    (0..n)
        .map(|i| {
            let ty = AssignmentType::ALL[i % AssignmentType::ALL.len()];
            let percent = ((i * 37 + seed * 11) % 110) as f64;
            AssignmentResult::new(format!("a{i}"), ty, percent, percent >= 50.0)
        })
        .collect()
}

fn bench_single_student(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_student");
    let criteria = make_criteria();

    for n in [10, 100, 1000] {
        let results = make_results(n, 0);
        group.bench_function(format!("{n}_results"), |b| {
            b.iter(|| evaluate(black_box(&criteria), black_box(&results)))
        });
    }

    group.finish();
}

fn bench_course(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_course");
    let engine = AdmissionEngine::new(make_criteria());

    for students in [50, 500] {
        let course = CourseResults {
            course_id: "bench".into(),
            students: (0..students)
                .map(|s| StudentResults {
                    student_id: format!("s{s}"),
                    results: make_results(40, s),
                })
                .collect(),
        };
        group.bench_function(format!("{students}_students"), |b| {
            b.iter(|| engine.evaluate_course(black_box(&course), &NoopObserver))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_student, bench_course);
criterion_main!(benches);
