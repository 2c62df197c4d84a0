use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use washbook_scheduler::logic::{check_availability, suggest_alternatives};
use washbook_scheduler::{
    Appointment, CustomerDetails, NewAppointment, Scheduler, ServiceCatalog,
};

fn opening_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap()
}

// Back-to-back bookings of `service` starting at `base`
fn create_ledger(
    base: DateTime<Utc>,
    count: usize,
    service: &str,
    gap_minutes: i64,
) -> Vec<Appointment> {
    let catalog = ServiceCatalog::builtin();
    let step = catalog.duration_of(service) + Duration::minutes(gap_minutes);
    (0..count)
        .map(|i| Appointment {
            id: format!("BK-BENCH{i}"),
            start: base + step * i as i32,
            service: service.to_string(),
            customer: CustomerDetails::default(),
            created_at: opening_time(),
        })
        .collect()
}

fn benchmark_suggest_alternatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest_alternatives");
    let catalog = ServiceCatalog::builtin();
    let now = opening_time();
    let target = now + Duration::hours(24);

    group.bench_function("empty_ledger", |b| {
        let ledger = Vec::new();
        b.iter(|| {
            suggest_alternatives(
                black_box(&catalog),
                black_box(target),
                black_box("Basic Wash"),
                black_box(now),
                black_box(&ledger),
            )
        })
    });

    group.bench_function("busy_day", |b| {
        // a full day of hourly washes with 30 minute gaps
        let ledger = create_ledger(now, 16, "Basic Wash", 30);
        b.iter(|| {
            suggest_alternatives(
                black_box(&catalog),
                black_box(now + Duration::hours(5)),
                black_box("Interior Clean"),
                black_box(now),
                black_box(&ledger),
            )
        })
    });

    group.bench_function("fully_booked_month", |b| {
        let ledger = create_ledger(now, 24 * 30, "Basic Wash", 0);
        b.iter(|| {
            suggest_alternatives(
                black_box(&catalog),
                black_box(target),
                black_box("Full Detail"),
                black_box(now),
                black_box(&ledger),
            )
        })
    });

    group.finish();
}

fn benchmark_check_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_availability");
    let catalog = ServiceCatalog::builtin();
    let now = opening_time();

    group.bench_function("conflict_with_suggestions", |b| {
        let ledger = create_ledger(now, 200, "Interior Clean", 60);
        b.iter(|| {
            check_availability(
                black_box(&catalog),
                black_box(now + Duration::hours(3)),
                black_box("Basic Wash"),
                black_box(now),
                black_box(&ledger),
            )
        })
    });

    group.bench_function("commit_into_scheduler", |b| {
        b.iter_with_setup(
            || Scheduler::in_memory(ServiceCatalog::builtin()),
            |scheduler| {
                for hour in 1..=12 {
                    let request = NewAppointment {
                        start: now + Duration::hours(hour),
                        service: "Basic Wash".to_string(),
                        customer: CustomerDetails::default(),
                    };
                    let _ = black_box(scheduler.commit(request, now));
                }
                scheduler
            },
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_suggest_alternatives,
    benchmark_check_availability
);
criterion_main!(benches);
