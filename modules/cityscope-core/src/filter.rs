use geodb_client::City;

use crate::state::SearchFilters;

/// Apply population and country constraints to the last-fetched result set.
///
/// Pure: equal inputs give equal outputs, the input slice is never mutated,
/// and the output is a subset of the input preserving its order. An inverted
/// population range (min > max) yields an empty result rather than an error.
pub fn filtered_cities(cities: &[City], filters: &SearchFilters) -> Vec<City> {
    let country = filters.country.to_lowercase();

    cities
        .iter()
        .filter(|c| c.population >= filters.min_population)
        .filter(|c| filters.max_population.map_or(true, |max| c.population <= max))
        .filter(|c| country.is_empty() || c.country.to_lowercase().contains(&country))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{city, new_york};

    #[test]
    fn no_filters_keeps_everything_in_order() {
        let cities = vec![
            city(1, "New York", "United States", 8_400_000),
            city(2, "Newark", "United States", 311_000),
            city(3, "Newcastle", "United Kingdom", 300_000),
        ];

        let out = filtered_cities(&cities, &SearchFilters::default());
        assert_eq!(out, cities);
    }

    #[test]
    fn equal_inputs_give_equal_outputs() {
        let cities = vec![new_york(), city(2, "Newark", "United States", 311_000)];
        let filters = SearchFilters {
            min_population: 1_000_000,
            ..Default::default()
        };

        assert_eq!(
            filtered_cities(&cities, &filters),
            filtered_cities(&cities, &filters)
        );
    }

    #[test]
    fn respects_min_population() {
        let cities = vec![new_york(), city(2, "Newark", "United States", 311_000)];
        let filters = SearchFilters {
            min_population: 1_000_000,
            ..Default::default()
        };

        let out = filtered_cities(&cities, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "New York");
    }

    #[test]
    fn respects_max_population() {
        let cities = vec![new_york(), city(2, "Newark", "United States", 311_000)];
        let filters = SearchFilters {
            max_population: Some(1_000_000),
            ..Default::default()
        };

        let out = filtered_cities(&cities, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Newark");
    }

    #[test]
    fn country_match_is_case_insensitive_substring() {
        let cities = vec![
            new_york(),
            city(3, "Newcastle", "United Kingdom", 300_000),
        ];
        let filters = SearchFilters {
            country: "kingdom".to_string(),
            ..Default::default()
        };

        let out = filtered_cities(&cities, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "United Kingdom");
    }

    #[test]
    fn inverted_range_yields_empty_not_error() {
        let cities = vec![new_york()];
        let filters = SearchFilters {
            min_population: 9_000_000,
            max_population: Some(1_000_000),
            ..Default::default()
        };

        assert!(filtered_cities(&cities, &filters).is_empty());
    }

    #[test]
    fn output_is_subset_of_input() {
        let cities = vec![
            new_york(),
            city(2, "Newark", "United States", 311_000),
            city(3, "Newcastle", "United Kingdom", 300_000),
        ];
        let filters = SearchFilters {
            min_population: 250_000,
            max_population: Some(500_000),
            country: "united".to_string(),
        };

        let out = filtered_cities(&cities, &filters);
        assert!(out.iter().all(|c| cities.contains(c)));
    }
}
