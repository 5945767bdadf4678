//! Benchmarks for the P3P solve and the per-frame update path

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use face_pose::camera::{CameraModel, RayProjector};
use face_pose::constants::{LEFT_EYE_WORLD, NOSE_WORLD, RIGHT_EYE_WORLD};
use face_pose::estimator::{EstimatorOptions, PoseEstimator};
use face_pose::landmarks::{BodyPart, Keypoint, Pose};
use face_pose::p3p;

fn face_frame() -> Pose {
    let mut pose = Pose::new();
    pose.insert(BodyPart::Nose, Keypoint::new(384.0, 420.0, 0.95));
    pose.insert(BodyPart::LeftEye, Keypoint::new(300.0, 400.0, 0.9));
    pose.insert(BodyPart::RightEye, Keypoint::new(468.0, 400.0, 0.9));
    pose
}

fn benchmark_p3p_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("p3p");

    let camera = CameraModel::new(768.0, 1024.0, 78.0).expect("valid camera");
    let f1 = RayProjector::project(300.0, 400.0, &camera);
    let f2 = RayProjector::project(468.0, 400.0, &camera);
    let f3 = RayProjector::project(384.0, 420.0, &camera);

    group.bench_function("solve", |b| {
        b.iter(|| {
            let solutions = p3p::solve(
                black_box(&f1),
                black_box(&f2),
                black_box(&f3),
                &LEFT_EYE_WORLD,
                &RIGHT_EYE_WORLD,
                &NOSE_WORLD,
            )
            .expect("solver succeeds");
            black_box(solutions);
        });
    });

    group.finish();
}

fn benchmark_estimator_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");
    let frame = face_frame();

    let mut p3p_estimator = PoseEstimator::new(EstimatorOptions::default());
    p3p_estimator.set_resolution(768.0, 1024.0).expect("valid resolution");
    group.bench_function("update_p3p", |b| {
        b.iter(|| {
            let outcome = p3p_estimator.update(black_box(&frame)).expect("update succeeds");
            black_box(outcome);
        });
    });

    let mut fallback_estimator = PoseEstimator::new(EstimatorOptions {
        use_p3p: false,
        use_kalman_filter: true,
    });
    fallback_estimator.set_resolution(768.0, 1024.0).expect("valid resolution");
    group.bench_function("update_fallback", |b| {
        b.iter(|| {
            let outcome = fallback_estimator.update(black_box(&frame)).expect("update succeeds");
            black_box(outcome);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_p3p_solve, benchmark_estimator_update);
criterion_main!(benches);
