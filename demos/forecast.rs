use clima::{ClimaError, ClimateDashboard, FeatureMode, Month, Query, Target};

fn main() -> Result<(), ClimaError> {
    let dashboard = ClimateDashboard::builder()
        .source("data/clima_sample.csv")
        .build();

    let next = dashboard.predict_next_month("San Rafael", Month(2022, 12))?;
    println!(
        "San Rafael max temperature for {}: {:.1} °C",
        next.date, next.value
    );

    let query = Query::builder().locality("Atlautla").year(2022).build();
    let seasonal = dashboard.forecast(&query, Target::Tmin, FeatureMode::CalendarSeasonal, 3)?;
    println!("\nAtlautla min temperature (R² {:.3}):", seasonal.r_squared);
    for point in &seasonal.points {
        println!("  {}: {:.1}", point.date, point.value);
    }

    let outlook = dashboard.daily_outlook(&query, 7)?;
    for target in Target::ALL {
        match outlook.get(target) {
            Ok(forecast) => {
                let last = forecast.points.last().map_or(f64::NAN, |p| p.value);
                println!("{target}: {:.2} in 7 days (R² {:.3})", last, forecast.r_squared);
            }
            Err(e) => println!("{target}: {e}"),
        }
    }

    Ok(())
}
