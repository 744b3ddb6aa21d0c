// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};
use understory_touch::phase::{ContactSample, TouchPhase};
use understory_touch::{ClassifierConfig, ContactClassifier, ContactEvent, ContactTracker};

fn drag_samples(len: usize) -> Vec<ContactSample> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            ContactSample::new(TouchPhase::Moved, Point::new(x, x * 0.5))
                .with_delta(Vec2::new(x, x * 0.5))
                .with_delta_time(1.0 / 120.0)
        })
        .collect()
}

fn bench_single_contact(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch/classifier_drag");
    let config = ClassifierConfig::default().with_contact_epsilon(0.01);

    for len in [16usize, 128, 1_024] {
        let samples = drag_samples(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("vec_sink", len), &samples, |b, samples| {
            b.iter_batched(
                || (ContactClassifier::new(config), Vec::<ContactEvent>::with_capacity(len + 8)),
                |(mut classifier, mut events)| {
                    classifier.on_contact_start(&mut events).unwrap();
                    for s in samples {
                        classifier.on_contact_sample(*s, &mut events).unwrap();
                    }
                    let end = ContactSample::new(TouchPhase::Ended, Point::ZERO);
                    black_box(classifier.on_contact_end(end, &mut events).unwrap());
                    black_box(events);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("discard", len), &samples, |b, samples| {
            let mut classifier = ContactClassifier::new(config);
            b.iter(|| {
                classifier.on_contact_start(&mut ()).unwrap();
                for s in samples {
                    classifier.on_contact_sample(*s, &mut ()).unwrap();
                }
                let end = ContactSample::new(TouchPhase::Ended, Point::ZERO);
                black_box(classifier.on_contact_end(end, &mut ()).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_tracker_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch/tracker_frame");

    // One frame: every contact reports a Moved sample.
    for contacts in [1u32, 5, 10] {
        group.throughput(Throughput::Elements(u64::from(contacts)));
        group.bench_with_input(
            BenchmarkId::new("moved", contacts),
            &contacts,
            |b, &contacts| {
                let mut tracker = ContactTracker::<u32>::default();
                let mut sink = |id: u32, event: ContactEvent| {
                    black_box((id, event));
                };
                for id in 0..contacts {
                    tracker
                        .handle(id, ContactSample::new(TouchPhase::Began, Point::ZERO), &mut sink)
                        .unwrap();
                }
                let moved = ContactSample::new(TouchPhase::Moved, Point::new(1.0, 1.0))
                    .with_delta_time(1.0 / 120.0);
                b.iter(|| {
                    for id in 0..contacts {
                        tracker.handle(id, moved, &mut sink).unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_contact, bench_tracker_frames);
criterion_main!(benches);
