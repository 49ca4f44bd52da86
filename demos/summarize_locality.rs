use clima::{ClimaError, ClimateDashboard, Query};

fn main() -> Result<(), ClimaError> {
    let dashboard = ClimateDashboard::builder()
        .source("data/clima_sample.csv")
        .build();

    for card in dashboard.overview()? {
        println!("{} ({} observations)", card.name, card.observations);
        if let Some(coordinates) = card.coordinates {
            println!("  at {:.4}, {:.4}", coordinates.0, coordinates.1);
        }
        println!("  {}", card.description);
    }

    let july = dashboard
        .view()
        .locality("Atlautla")
        .year(2021)
        .month(7)
        .call()?;
    let summary = clima::summarize(&july);
    println!(
        "\nAtlautla, July 2021: max {} °C, min {} °C, rain {} mm over {} rows",
        summary.mean_tmax, summary.mean_tmin, summary.sum_precip, summary.count
    );
    if let (Some(max), Some(min)) = (summary.mean_tmax.value(), summary.mean_tmin.value()) {
        println!("Mean daily range: {:.1} °C", max - min);
    }

    let year = Query::builder().locality("Tlalmanalco").year(2022).build();
    for (month, summary) in dashboard.monthly_summaries(&year)? {
        println!("{month}: max {} rain {}", summary.mean_tmax, summary.sum_precip);
    }

    Ok(())
}
