use openmeteo::{
    OpenMeteo, OpenMeteoError, PrecipitationUnit, ResponseUnits, TemperatureUnit,
};
use polars::prelude::*;
use std::env;

fn main() -> Result<(), OpenMeteoError> {
    configure_polars_display();
    let client = OpenMeteo::new()?;

    let table = client
        .ensemble_forecast()
        .location("Indianapolis")
        .hourly(&["temperature_2m", "precipitation"])
        .model("gfs_seamless")
        .response_units(
            ResponseUnits::builder()
                .temperature(TemperatureUnit::Fahrenheit)
                .precipitation(PrecipitationUnit::Inch)
                .build(),
        )
        .call()?;

    println!(
        "{} rows, {} columns for {:?}",
        table.height(),
        table.width(),
        table.metadata.timezone
    );

    // Spread of the temperature members per hour.
    let members = table.member_columns(openmeteo::Resolution::Hourly, "temperature_2m");
    let spread = table
        .lazy()
        .select([
            col(table.time_column()),
            min_horizontal(members.iter().map(|m| col(m.as_str())).collect::<Vec<_>>())?
                .alias("min"),
            max_horizontal(members.iter().map(|m| col(m.as_str())).collect::<Vec<_>>())?
                .alias("max"),
        ])
        .collect()?;
    println!("{:#?}", spread);

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
