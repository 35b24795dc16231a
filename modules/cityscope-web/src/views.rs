//! View models for the presentation surface.
//!
//! Every presentation decision (labels, disabled flags, map focus) is made
//! here; the page's JS shim only injects what it is given.

use serde::Serialize;

use cityscope_core::SearchSnapshot;
use geodb_client::City;

/// World view when no city is focused.
const WORLD_CENTER: [f64; 2] = [0.0, 0.0];
const WORLD_ZOOM: u8 = 2;
/// Zoomed-in view when a city is selected.
const CITY_ZOOM: u8 = 10;

#[derive(Debug, Serialize)]
pub struct StateView {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub cities: Vec<CityView>,
    #[serde(rename = "selectedId")]
    pub selected_id: Option<u64>,
    pub map: MapView,
    pub pagination: PaginationView,
}

#[derive(Debug, Serialize)]
pub struct CityView {
    pub id: u64,
    pub name: String,
    pub country: String,
    #[serde(rename = "populationLabel")]
    pub population_label: String,
    #[serde(rename = "locationLabel")]
    pub location_label: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Debug, Serialize)]
pub struct PaginationView {
    /// The pagination row only shows once there is more than one page.
    pub visible: bool,
    pub label: String,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
}

pub fn snapshot_to_view(snapshot: &SearchSnapshot) -> StateView {
    let cities: Vec<CityView> = snapshot.cities.iter().map(city_to_view).collect();

    let map = match &snapshot.selected {
        Some(sel) => MapView {
            center: [sel.latitude, sel.longitude],
            zoom: CITY_ZOOM,
        },
        None => MapView {
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
        },
    };

    let pagination = PaginationView {
        visible: snapshot.total_pages > 1,
        label: format!("Page {} of {}", snapshot.page + 1, snapshot.total_pages),
        has_prev: snapshot.page > 0 && !snapshot.loading,
        has_next: snapshot.page + 1 < snapshot.total_pages && !snapshot.loading,
    };

    StateView {
        query: snapshot.query.clone(),
        loading: snapshot.loading,
        error: snapshot.error.clone(),
        cities,
        selected_id: snapshot.selected.as_ref().map(|c| c.id),
        map,
        pagination,
    }
}

fn city_to_view(city: &City) -> CityView {
    CityView {
        id: city.id,
        name: city.name.clone(),
        country: city.country.clone(),
        population_label: format_population(city.population),
        location_label: format!("{:.2}, {:.2}", city.latitude, city.longitude),
        latitude: city.latitude,
        longitude: city.longitude,
    }
}

/// Group digits in threes: 8400000 → "8,400,000".
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_york() -> City {
        City {
            id: 1,
            wiki_data_id: "Q60".to_string(),
            city_type: "CITY".to_string(),
            city: "New York".to_string(),
            name: "New York".to_string(),
            country: "United States".to_string(),
            country_code: "US".to_string(),
            region: "New York".to_string(),
            population: 8_400_000,
            latitude: 40.7128,
            longitude: -74.006,
        }
    }

    fn snapshot(cities: Vec<City>) -> SearchSnapshot {
        SearchSnapshot {
            query: "New".to_string(),
            page: 0,
            total_pages: 1,
            total_count: cities.len() as u64,
            cities,
            selected: None,
            loading: false,
            error: None,
        }
    }

    #[test]
    fn groups_population_digits_in_threes() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1_000), "1,000");
        assert_eq!(format_population(8_400_000), "8,400,000");
        assert_eq!(format_population(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn city_view_carries_formatted_labels() {
        let view = snapshot_to_view(&snapshot(vec![new_york()]));

        assert_eq!(view.cities.len(), 1);
        let city = &view.cities[0];
        assert_eq!(city.name, "New York");
        assert_eq!(city.country, "United States");
        assert_eq!(city.population_label, "8,400,000");
        assert_eq!(city.location_label, "40.71, -74.01");
    }

    #[test]
    fn map_defaults_to_world_view() {
        let view = snapshot_to_view(&snapshot(vec![new_york()]));

        assert_eq!(view.map.center, [0.0, 0.0]);
        assert_eq!(view.map.zoom, 2);
        assert!(view.selected_id.is_none());
    }

    #[test]
    fn map_zooms_to_the_selected_city() {
        let mut snap = snapshot(vec![new_york()]);
        snap.selected = Some(new_york());

        let view = snapshot_to_view(&snap);
        assert_eq!(view.map.center, [40.7128, -74.006]);
        assert_eq!(view.map.zoom, 10);
        assert_eq!(view.selected_id, Some(1));
    }

    #[test]
    fn pagination_hidden_with_a_single_page() {
        let view = snapshot_to_view(&snapshot(vec![new_york()]));
        assert!(!view.pagination.visible);
    }

    #[test]
    fn pagination_flags_respect_boundaries() {
        let mut snap = snapshot(vec![new_york()]);
        snap.total_pages = 3;

        let view = snapshot_to_view(&snap);
        assert!(view.pagination.visible);
        assert_eq!(view.pagination.label, "Page 1 of 3");
        assert!(!view.pagination.has_prev);
        assert!(view.pagination.has_next);

        snap.page = 2;
        let view = snapshot_to_view(&snap);
        assert_eq!(view.pagination.label, "Page 3 of 3");
        assert!(view.pagination.has_prev);
        assert!(!view.pagination.has_next);
    }

    #[test]
    fn pagination_disabled_while_loading() {
        let mut snap = snapshot(vec![new_york()]);
        snap.total_pages = 3;
        snap.page = 1;
        snap.loading = true;

        let view = snapshot_to_view(&snap);
        assert!(!view.pagination.has_prev);
        assert!(!view.pagination.has_next);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let view = snapshot_to_view(&snapshot(vec![new_york()]));
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("selectedId").is_some());
        assert!(json["cities"][0].get("populationLabel").is_some());
        assert!(json["pagination"].get("hasPrev").is_some());
    }
}
