//! 逆ジオコーディング結果からの地域文字列導出
//!
//! Nominatimレスポンスの住所要素を road / neighbourhood / suburb /
//! city|town|village / state の順でカンマ結合する。要素が1つもなければ
//! display_name、それも無ければ座標文字列へフォールバックする。

use serde::Deserialize;

/// Nominatim逆ジオコーディングAPIのURL
pub fn nominatim_url(lat: f64, lng: f64) -> String {
    format!(
        "https://nominatim.openstreetmap.org/reverse?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
        lat, lng
    )
}

/// 逆ジオコーディングのレスポンス(必要フィールドのみ)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReverseGeocodeResponse {
    pub display_name: String,
    pub address: GeoAddress,
}

/// 住所要素(存在しないフィールドは空文字)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeoAddress {
    pub road: String,
    pub neighbourhood: String,
    pub suburb: String,
    pub city: String,
    pub town: String,
    pub village: String,
    pub state: String,
}

impl GeoAddress {
    /// city → town → village の優先順で市区町村名を返す
    fn municipality(&self) -> &str {
        if !self.city.is_empty() {
            &self.city
        } else if !self.town.is_empty() {
            &self.town
        } else {
            &self.village
        }
    }
}

/// 地域文字列を導出する(決定的)
pub fn derive_area(response: &ReverseGeocodeResponse, lat: f64, lng: f64) -> String {
    let addr = &response.address;
    let mut parts: Vec<&str> = Vec::new();

    if !addr.road.is_empty() {
        parts.push(&addr.road);
    }
    if !addr.neighbourhood.is_empty() {
        parts.push(&addr.neighbourhood);
    }
    if !addr.suburb.is_empty() {
        parts.push(&addr.suburb);
    }
    let municipality = addr.municipality();
    if !municipality.is_empty() {
        parts.push(municipality);
    }
    if !addr.state.is_empty() {
        parts.push(&addr.state);
    }

    if !parts.is_empty() {
        return parts.join(", ");
    }
    if !response.display_name.is_empty() {
        return response.display_name.clone();
    }
    format!("{}, {}", lat, lng)
}

/// ジオコーディング呼び出し自体が失敗したときの座標文字列
pub fn coordinate_fallback(lat: f64, lng: f64) -> String {
    format!("{:.6}, {:.6}", lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_area_joins_present_parts() {
        let response = ReverseGeocodeResponse {
            display_name: "Main St, Springfield, Sangamon County, IL, USA".to_string(),
            address: GeoAddress {
                road: "Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(
            derive_area(&response, 39.8, -89.6),
            "Main St, Springfield, IL"
        );
    }

    #[test]
    fn test_derive_area_town_fallback() {
        let response = ReverseGeocodeResponse {
            address: GeoAddress {
                road: "High St".to_string(),
                town: "Thame".to_string(),
                state: "England".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(derive_area(&response, 51.7, -0.9), "High St, Thame, England");
    }

    #[test]
    fn test_derive_area_city_wins_over_village() {
        let response = ReverseGeocodeResponse {
            address: GeoAddress {
                city: "Bengaluru".to_string(),
                village: "Ignored".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(derive_area(&response, 12.9, 77.5), "Bengaluru");
    }

    #[test]
    fn test_derive_area_display_name_fallback() {
        let response = ReverseGeocodeResponse {
            display_name: "Somewhere, Earth".to_string(),
            address: GeoAddress::default(),
        };
        assert_eq!(derive_area(&response, 1.0, 2.0), "Somewhere, Earth");
    }

    #[test]
    fn test_derive_area_coordinate_fallback() {
        let response = ReverseGeocodeResponse::default();
        assert_eq!(derive_area(&response, 12.5, 77.25), "12.5, 77.25");
    }

    #[test]
    fn test_coordinate_fallback_six_decimals() {
        assert_eq!(coordinate_fallback(12.971598, 77.594566), "12.971598, 77.594566");
        assert_eq!(coordinate_fallback(1.0, 2.0), "1.000000, 2.000000");
    }

    #[test]
    fn test_nominatim_url() {
        let url = nominatim_url(12.9716, 77.5946);
        assert!(url.starts_with("https://nominatim.openstreetmap.org/reverse?"));
        assert!(url.contains("format=json"));
        assert!(url.contains("lat=12.9716"));
        assert!(url.contains("lon=77.5946"));
        assert!(url.contains("zoom=18"));
        assert!(url.contains("addressdetails=1"));
    }

    #[test]
    fn test_response_deserialize() {
        let json = r#"{
            "display_name": "Main St, Springfield, IL, USA",
            "address": {
                "road": "Main St",
                "city": "Springfield",
                "state": "IL",
                "country": "USA"
            }
        }"#;
        let response: ReverseGeocodeResponse = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(response.address.road, "Main St");
        assert_eq!(response.address.neighbourhood, "");
        assert_eq!(derive_area(&response, 0.0, 0.0), "Main St, Springfield, IL");
    }
}
