use super::types::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransformError {
    #[error("No forecast location found in upstream payload")]
    LocationNotFound,
}

type FieldSetter = fn(&mut ForecastPeriod, &str);

/// CWA element name to the period field it fills. Elements not listed here
/// are skipped.
const ELEMENT_FIELDS: &[(&str, FieldSetter)] = &[
    ("Wx", set_weather_condition),
    ("PoP", set_precipitation_chance),
    ("MinT", set_min_temp),
    ("MaxT", set_max_temp),
    ("CI", set_comfort_index),
    ("WS", set_wind_speed),
];

fn set_weather_condition(period: &mut ForecastPeriod, value: &str) {
    period.weather_condition = value.to_string();
}

fn set_precipitation_chance(period: &mut ForecastPeriod, value: &str) {
    period.precipitation_chance_percent = format!("{}%", value);
}

fn set_min_temp(period: &mut ForecastPeriod, value: &str) {
    period.min_temp_c = format!("{}°C", value);
}

fn set_max_temp(period: &mut ForecastPeriod, value: &str) {
    period.max_temp_c = format!("{}°C", value);
}

fn set_comfort_index(period: &mut ForecastPeriod, value: &str) {
    period.comfort_index = value.to_string();
}

fn set_wind_speed(period: &mut ForecastPeriod, value: &str) {
    period.wind_speed = value.to_string();
}

fn field_setter(element_name: &str) -> Option<FieldSetter> {
    ELEMENT_FIELDS
        .iter()
        .find(|(name, _)| *name == element_name)
        .map(|(_, setter)| *setter)
}

/// Flattens the first location of a CWA 36-hour forecast into one record per
/// time slot.
///
/// The first weather element decides how many periods there are and supplies
/// their start/end times. Other elements are read at the same index; a shorter
/// element leaves its field empty for the missing slots and extra trailing
/// slots are ignored.
pub fn transform(payload: &CwaForecastResponse) -> Result<CityForecast, TransformError> {
    let location = payload
        .records
        .location
        .first()
        .ok_or(TransformError::LocationNotFound)?;

    let elements: Vec<(&CwaWeatherElement, Option<FieldSetter>)> = location
        .weather_element
        .iter()
        .map(|element| (element, field_setter(&element.element_name)))
        .collect();

    let slots = location
        .weather_element
        .first()
        .map(|element| element.time.as_slice())
        .unwrap_or_default();

    let forecasts = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let mut period = ForecastPeriod {
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                ..Default::default()
            };

            for (element, setter) in &elements {
                let (Some(setter), Some(entry)) = (setter, element.time.get(index)) else {
                    continue;
                };
                setter(&mut period, &entry.parameter.parameter_name);
            }

            period
        })
        .collect();

    Ok(CityForecast {
        city_name: location.location_name.clone(),
        update_description: payload
            .records
            .dataset_description
            .clone()
            .unwrap_or_default(),
        forecasts,
    })
}
