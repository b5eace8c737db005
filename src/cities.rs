use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityEntry {
    pub id: &'static str,
    pub localized_name: &'static str,
}

const fn city(id: &'static str, localized_name: &'static str) -> CityEntry {
    CityEntry { id, localized_name }
}

/// Short ids accepted on `/api/weather/:id`, mapped to CWA location names.
pub static CITIES: &[CityEntry] = &[
    city("taipei", "臺北市"),
    city("newtaipei", "新北市"),
    city("taoyuan", "桃園市"),
    city("taichung", "臺中市"),
    city("tainan", "臺南市"),
    city("kaohsiung", "高雄市"),
    city("keelung", "基隆市"),
    city("hsinchu", "新竹市"),
    city("hsinchucounty", "新竹縣"),
    city("miaoli", "苗栗縣"),
    city("changhua", "彰化縣"),
    city("nantou", "南投縣"),
    city("yunlin", "雲林縣"),
    city("chiayi", "嘉義市"),
    city("chiayicounty", "嘉義縣"),
    city("pingtung", "屏東縣"),
    city("yilan", "宜蘭縣"),
    city("hualien", "花蓮縣"),
    city("taitung", "臺東縣"),
    city("penghu", "澎湖縣"),
    city("kinmen", "金門縣"),
    city("lienchiang", "連江縣"),
];

/// Maps a city id to its location name. Anything that is not a known id is
/// passed through, so callers may send the location name directly.
pub fn resolve(token: &str) -> String {
    CITIES
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(token))
        .map(|entry| entry.localized_name.to_string())
        .unwrap_or_else(|| token.to_string())
}

pub fn list_all() -> &'static [CityEntry] {
    CITIES
}
