//! Unit preferences for the values returned by the API.
//!
//! Each category maps to one query key (`temperature_unit`, `wind_speed_unit`, ...).
//! Categories left unset are not sent, so the API applies its defaults
//! (celsius, km/h, mm, metric).

use crate::request::error::ValidationError;
use bon::Builder;
use std::fmt;
use std::str::FromStr;

/// A unit category the API lets callers choose a unit for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitCategory {
    Temperature,
    WindSpeed,
    Precipitation,
    /// Wave heights and other lengths. Only the marine family of endpoints accepts it.
    Length,
}

impl UnitCategory {
    pub(crate) fn query_key(&self) -> &'static str {
        match self {
            UnitCategory::Temperature => "temperature_unit",
            UnitCategory::WindSpeed => "wind_speed_unit",
            UnitCategory::Precipitation => "precipitation_unit",
            UnitCategory::Length => "length_unit",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_key())
    }
}

macro_rules! unit_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $category:expr, { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub(crate) fn query_value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.query_value())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($value => Ok($name::$variant),)+
                    _ => Err(ValidationError::UnknownUnit {
                        category: $category,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

unit_enum!(
    /// Temperature unit, sent as `temperature_unit`.
    TemperatureUnit, UnitCategory::Temperature, {
        Celsius => "celsius",
        Fahrenheit => "fahrenheit",
    }
);

unit_enum!(
    /// Wind speed unit, sent as `wind_speed_unit`.
    WindSpeedUnit, UnitCategory::WindSpeed, {
        KilometresPerHour => "kmh",
        MetresPerSecond => "ms",
        MilesPerHour => "mph",
        Knots => "kn",
    }
);

unit_enum!(
    /// Precipitation unit, sent as `precipitation_unit`.
    PrecipitationUnit, UnitCategory::Precipitation, {
        Millimetres => "mm",
        Inch => "inch",
    }
);

unit_enum!(
    /// Length unit, sent as `length_unit`.
    LengthUnit, UnitCategory::Length, {
        Metric => "metric",
        Imperial => "imperial",
    }
);

/// The unit preferences for one request.
///
/// # Examples
///
/// ```
/// use openmeteo::{PrecipitationUnit, ResponseUnits, TemperatureUnit};
///
/// let units = ResponseUnits::builder()
///     .temperature(TemperatureUnit::Fahrenheit)
///     .precipitation(PrecipitationUnit::Inch)
///     .build();
/// assert_eq!(units.temperature, Some(TemperatureUnit::Fahrenheit));
/// assert_eq!(units.wind_speed, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct ResponseUnits {
    pub temperature: Option<TemperatureUnit>,
    pub wind_speed: Option<WindSpeedUnit>,
    pub precipitation: Option<PrecipitationUnit>,
    pub length: Option<LengthUnit>,
}

impl ResponseUnits {
    /// The categories the caller specified, paired with their query value,
    /// in a fixed category order.
    pub(crate) fn specified(&self) -> Vec<(UnitCategory, &'static str)> {
        [
            self.temperature
                .map(|u| (UnitCategory::Temperature, u.query_value())),
            self.wind_speed
                .map(|u| (UnitCategory::WindSpeed, u.query_value())),
            self.precipitation
                .map(|u| (UnitCategory::Precipitation, u.query_value())),
            self.length.map(|u| (UnitCategory::Length, u.query_value())),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_str_is_case_insensitive() {
        assert_eq!(
            "Fahrenheit".parse::<TemperatureUnit>().unwrap(),
            TemperatureUnit::Fahrenheit
        );
        assert_eq!("inch".parse::<PrecipitationUnit>().unwrap(), PrecipitationUnit::Inch);
        assert_eq!("KN".parse::<WindSpeedUnit>().unwrap(), WindSpeedUnit::Knots);
    }

    #[test]
    fn test_unknown_unit_names_category() {
        let err = "kelvin".parse::<TemperatureUnit>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownUnit {
                category: UnitCategory::Temperature,
                ref value
            } if value == "kelvin"
        ));
    }

    #[test]
    fn test_specified_only_lists_set_categories() {
        let units = ResponseUnits::builder()
            .precipitation(PrecipitationUnit::Inch)
            .temperature(TemperatureUnit::Fahrenheit)
            .build();
        assert_eq!(
            units.specified(),
            vec![
                (UnitCategory::Temperature, "fahrenheit"),
                (UnitCategory::Precipitation, "inch"),
            ]
        );
        assert!(ResponseUnits::default().specified().is_empty());
    }
}
