use serde::{Deserialize, Serialize};

// Raw CWA open-data document. Arrays default to empty so a sparse payload
// still decodes and is judged by the transformer instead.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CwaForecastResponse {
    #[serde(default)]
    pub success: Option<String>,
    #[serde(default)]
    pub records: CwaRecords,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaRecords {
    #[serde(default)]
    pub dataset_description: Option<String>,
    #[serde(default)]
    pub location: Vec<CwaLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaLocation {
    pub location_name: String,
    #[serde(default)]
    pub weather_element: Vec<CwaWeatherElement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaWeatherElement {
    pub element_name: String,
    #[serde(default)]
    pub time: Vec<CwaTimeSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaTimeSlot {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub parameter: CwaParameter,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaParameter {
    #[serde(default)]
    pub parameter_name: String,
    #[serde(default)]
    pub parameter_value: Option<String>,
    #[serde(default)]
    pub parameter_unit: Option<String>,
}

/// One flattened time slot. Values are display strings; empty when the
/// upstream element is missing for the slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub start_time: String,
    pub end_time: String,
    pub weather_condition: String,
    pub precipitation_chance_percent: String,
    pub min_temp_c: String,
    pub max_temp_c: String,
    pub comfort_index: String,
    pub wind_speed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityForecast {
    pub city_name: String,
    pub update_description: String,
    pub forecasts: Vec<ForecastPeriod>,
}
