//! Overlap detection and view filtering over growing calendars.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evently::event_search::get_filtered_events;
use evently::overlap::find_overlaps;
use evently::{Event, EventForm, View};

/// One hour-long event per slot, spread over 2024 starting at 08:00.
fn calendar(size: usize) -> Vec<Event> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..size)
        .map(|i| {
            let date = base + chrono::Duration::days((i % 366) as i64);
            let hour = 8 + (i / 366) % 10;
            let mut form = EventForm::new(
                &format!("일정 {}", i),
                &date.format("%Y-%m-%d").to_string(),
                &format!("{:02}:00", hour),
                &format!("{:02}:00", hour + 1),
            );
            form.location = if i % 3 == 0 { "회의실".into() } else { "사무실".into() };
            Event::from_form(i.to_string(), form)
        })
        .collect()
}

fn bench_find_overlaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_overlaps");
    let candidate = EventForm::new("새 일정", "2024-07-01", "09:30", "10:30");

    for size in [100, 1_000, 10_000] {
        let events = calendar(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| black_box(find_overlaps(black_box(&candidate), events)))
        });
    }
    group.finish();
}

fn bench_filtered_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_filtered_events");
    let anchor = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap_or_default();
    let events = calendar(10_000);

    for (name, term, view) in [
        ("week", "", View::Week),
        ("month", "", View::Month),
        ("month_search", "회의실", View::Month),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(get_filtered_events(&events, black_box(term), anchor, view)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_overlaps, bench_filtered_events);
criterion_main!(benches);
