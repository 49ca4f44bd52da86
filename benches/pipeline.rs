use chrono::{Days, NaiveDate};
use clima::{
    fit, filter, summarize, with_calendar_fields, FeatureMode, Observation, Query, RecordSet,
    Target, TrendModel,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Ten years of daily rows for three localities.
fn synthetic_records() -> RecordSet {
    let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    let observations = ["Atlautla", "Juchitepec", "Tlalmanalco"]
        .iter()
        .flat_map(|locality| {
            (0..3650u64).map(move |i| {
                let wave = (i as f64 / 58.0).sin();
                Observation::new(*locality, start.checked_add_days(Days::new(i)))
                    .with_tmax(Some(22.0 + 4.0 * wave))
                    .with_tmin(Some(6.0 + 3.0 * wave))
                    .with_precip(Some((wave * 8.0).max(0.0)))
            })
        })
        .collect();
    with_calendar_fields(RecordSet::from_observations(observations))
}

fn bench_pipeline(c: &mut Criterion) {
    let records = synthetic_records();
    let locality = Query::builder().locality("Juchitepec").build();
    let month = Query::builder().locality("Juchitepec").year(2015).month(7).build();

    c.bench_function("filter_locality", |b| {
        b.iter(|| filter(black_box(&records), black_box(&locality)))
    });
    c.bench_function("filter_and_summarize_month", |b| {
        b.iter(|| summarize(&filter(black_box(&records), black_box(&month))))
    });

    let view = filter(&records, &locality);
    c.bench_function("fit_calendar_seasonal", |b| {
        b.iter(|| fit(black_box(&view), Target::Tmax, FeatureMode::CalendarSeasonal))
    });
    c.bench_function("fit_day_offset_precip_and_predict", |b| {
        b.iter(|| {
            fit(black_box(&view), Target::Precip, FeatureMode::DayOffset)
                .map(|model| model.predict(30))
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
