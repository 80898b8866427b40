//! Named query presets.
//!
//! The table is built once at startup and shared read-only; resolving a preset never mutates
//! it. Applying a search preset shallow-merges its overrides (preset wins) and always turns on
//! full-text rendering.

use crate::filters::{FacetParams, GenreExclusion, SearchFilters, DEFAULT_EXCLUDED_GENRES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(
    Debug, Deserialize, Serialize, schemars::JsonSchema, Clone, Copy, PartialEq, Eq, Hash,
)]
pub enum SearchPreset {
    /// French front-page selection of the last day.
    #[serde(rename = "a-la-une")]
    ALaUne,
    /// Upcoming events listings.
    #[serde(rename = "agenda")]
    Agenda,
    /// Editorial coverage plans.
    #[serde(rename = "previsions")]
    Previsions,
    /// English major stories of the last day.
    #[serde(rename = "major-stories")]
    MajorStories,
}

impl SearchPreset {
    pub const ALL: &'static [SearchPreset] = &[
        SearchPreset::ALaUne,
        SearchPreset::Agenda,
        SearchPreset::Previsions,
        SearchPreset::MajorStories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchPreset::ALaUne => "a-la-une",
            SearchPreset::Agenda => "agenda",
            SearchPreset::Previsions => "previsions",
            SearchPreset::MajorStories => "major-stories",
        }
    }
}

#[derive(
    Debug, Deserialize, Serialize, schemars::JsonSchema, Clone, Copy, PartialEq, Eq, Hash,
)]
pub enum FacetPreset {
    /// Most used topic slugs over the last day.
    #[serde(rename = "trending-topics")]
    TrendingTopics,
}

impl FacetPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetPreset::TrendingTopics => "trending-topics",
        }
    }
}

/// Overrides merged onto the caller's filters; `None` keeps the caller's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresetOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_exclusion: Option<Vec<String>>,
}

impl PresetOverrides {
    pub fn apply_to(&self, filters: &mut SearchFilters) {
        if let Some(products) = &self.products {
            filters.products = products.clone();
        }
        if let Some(languages) = &self.languages {
            filters.languages = languages.clone();
        }
        if let Some(topics) = &self.topics {
            filters.topics = topics.clone();
        }
        if let Some(date_from) = &self.date_from {
            filters.date_from = Some(date_from.clone());
        }
        if let Some(size) = self.size {
            filters.size = size;
        }
        if let Some(exclude) = &self.genre_exclusion {
            filters.genre_exclusion = GenreExclusion {
                exclude: exclude.clone(),
            };
        }
    }
}

/// Facet presets replace the facet name itself and inject a lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOverrides {
    pub facet: String,
    pub date_from: String,
    pub default_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetRequest {
    pub facet: String,
    pub params: FacetParams,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct PresetTable {
    search: HashMap<SearchPreset, PresetOverrides>,
    facets: HashMap<FacetPreset, FacetOverrides>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn exclusions_without(keep: &[&str]) -> Vec<String> {
    DEFAULT_EXCLUDED_GENRES
        .iter()
        .filter(|genre| !keep.contains(genre))
        .map(|genre| genre.to_string())
        .collect()
}

impl PresetTable {
    pub fn builtin() -> Self {
        let mut search = HashMap::new();
        search.insert(
            SearchPreset::ALaUne,
            PresetOverrides {
                products: Some(strings(&["news"])),
                languages: Some(strings(&["fr"])),
                topics: Some(strings(&["une"])),
                date_from: Some("now-1d".to_string()),
                size: Some(10),
                genre_exclusion: None,
            },
        );
        search.insert(
            SearchPreset::Agenda,
            PresetOverrides {
                products: Some(strings(&["news"])),
                topics: Some(strings(&["agenda"])),
                date_from: Some("now-1d".to_string()),
                size: Some(20),
                genre_exclusion: Some(exclusions_without(&["afpattribute:Agenda"])),
                ..PresetOverrides::default()
            },
        );
        search.insert(
            SearchPreset::Previsions,
            PresetOverrides {
                products: Some(strings(&["news"])),
                topics: Some(strings(&["previsions"])),
                date_from: Some("now-1d".to_string()),
                size: Some(20),
                genre_exclusion: Some(exclusions_without(&[
                    "afpattribute:Program",
                    "afpattribute:TextProgram",
                ])),
                ..PresetOverrides::default()
            },
        );
        search.insert(
            SearchPreset::MajorStories,
            PresetOverrides {
                products: Some(strings(&["news"])),
                languages: Some(strings(&["en"])),
                topics: Some(strings(&["major-stories"])),
                date_from: Some("now-1d".to_string()),
                size: Some(10),
                genre_exclusion: None,
            },
        );

        let mut facets = HashMap::new();
        facets.insert(
            FacetPreset::TrendingTopics,
            FacetOverrides {
                facet: "slug".to_string(),
                date_from: "now-1d".to_string(),
                default_size: 20,
            },
        );

        Self { search, facets }
    }

    pub fn resolve(&self, preset: SearchPreset) -> Option<&PresetOverrides> {
        self.search.get(&preset)
    }

    pub fn resolve_facet(&self, preset: FacetPreset) -> Option<&FacetOverrides> {
        self.facets.get(&preset)
    }

    /// Merges `preset` into `filters` and returns the effective full-text flag.
    pub fn apply_search(
        &self,
        filters: &mut SearchFilters,
        preset: Option<SearchPreset>,
        full_text: bool,
    ) -> bool {
        let Some(preset) = preset else {
            return full_text;
        };
        match self.resolve(preset) {
            Some(overrides) => overrides.apply_to(filters),
            None => log::warn!("preset '{}' has no overrides", preset.as_str()),
        }
        true
    }

    /// Builds the facet request, letting a preset replace the facet name and lookback.
    ///
    /// Returns `None` when neither a facet name nor a preset is given.
    pub fn facet_request(
        &self,
        facet: Option<String>,
        preset: Option<FacetPreset>,
        mut params: FacetParams,
        size: Option<usize>,
        default_size: usize,
    ) -> Option<FacetRequest> {
        if let Some(overrides) = preset.and_then(|p| self.resolve_facet(p)) {
            params.date_from = Some(overrides.date_from.clone());
            return Some(FacetRequest {
                facet: overrides.facet.clone(),
                params,
                size: size.unwrap_or(overrides.default_size),
            });
        }
        let facet = facet
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())?;
        Some(FacetRequest {
            facet,
            params,
            size: size.unwrap_or(default_size),
        })
    }

    pub fn search_presets(&self) -> impl Iterator<Item = (SearchPreset, &PresetOverrides)> {
        SearchPreset::ALL
            .iter()
            .filter_map(|preset| self.search.get(preset).map(|o| (*preset, o)))
    }

    pub fn facet_presets(&self) -> impl Iterator<Item = (FacetPreset, &FacetOverrides)> {
        self.facets.iter().map(|(preset, o)| (*preset, o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serde_names_match_the_public_tokens() {
        for preset in SearchPreset::ALL {
            let raw = serde_json::to_value(preset).unwrap();
            assert_eq!(raw, serde_json::Value::from(preset.as_str()));
        }
        let parsed: FacetPreset = serde_json::from_str("\"trending-topics\"").unwrap();
        assert_eq!(parsed, FacetPreset::TrendingTopics);
        assert!(serde_json::from_str::<SearchPreset>("\"breaking\"").is_err());
    }

    #[test]
    fn a_la_une_forces_full_text_and_french() {
        let table = PresetTable::builtin();
        let mut filters = SearchFilters {
            languages: vec!["en".to_string()],
            ..SearchFilters::default()
        };
        let full_text = table.apply_search(&mut filters, Some(SearchPreset::ALaUne), false);
        assert!(full_text);
        assert_eq!(filters.languages, vec!["fr".to_string()]);
        assert_eq!(filters.date_from.as_deref(), Some("now-1d"));
    }

    #[test]
    fn preset_keeps_unrelated_caller_filters() {
        let table = PresetTable::builtin();
        let mut filters = SearchFilters {
            query: Some("climat".to_string()),
            countries: vec!["fra".to_string()],
            offset: 20,
            ..SearchFilters::default()
        };
        table.apply_search(&mut filters, Some(SearchPreset::ALaUne), false);
        assert_eq!(filters.query.as_deref(), Some("climat"));
        assert_eq!(filters.countries, vec!["fra".to_string()]);
        assert_eq!(filters.offset, 20);
        assert_eq!(filters.genre_exclusion, GenreExclusion::default());
    }

    #[test]
    fn no_preset_leaves_filters_and_flag_alone() {
        let table = PresetTable::builtin();
        let mut filters = SearchFilters::default();
        assert!(!table.apply_search(&mut filters, None, false));
        assert!(table.apply_search(&mut filters, None, true));
        assert_eq!(filters, SearchFilters::default());
    }

    #[test]
    fn agenda_stops_excluding_agenda_genre() {
        let table = PresetTable::builtin();
        let mut filters = SearchFilters::default();
        table.apply_search(&mut filters, Some(SearchPreset::Agenda), false);
        assert!(!filters
            .genre_exclusion
            .exclude
            .contains(&"afpattribute:Agenda".to_string()));
        assert!(filters
            .genre_exclusion
            .exclude
            .contains(&"afpattribute:Program".to_string()));
    }

    #[test]
    fn trending_topics_overrides_facet_name_and_lookback() {
        let table = PresetTable::builtin();
        let request = table
            .facet_request(
                Some("genre".to_string()),
                Some(FacetPreset::TrendingTopics),
                FacetParams::default(),
                None,
                50,
            )
            .unwrap();
        assert_eq!(request.facet, "slug");
        assert_eq!(request.params.date_from.as_deref(), Some("now-1d"));
        assert_eq!(request.size, 20);

        let sized = table
            .facet_request(None, Some(FacetPreset::TrendingTopics), FacetParams::default(), Some(5), 50)
            .unwrap();
        assert_eq!(sized.size, 5);
    }

    #[test]
    fn facet_request_requires_name_or_preset() {
        let table = PresetTable::builtin();
        assert!(table
            .facet_request(None, None, FacetParams::default(), None, 50)
            .is_none());
        assert!(table
            .facet_request(Some("  ".to_string()), None, FacetParams::default(), None, 50)
            .is_none());
        let plain = table
            .facet_request(Some("genre".to_string()), None, FacetParams::default(), None, 50)
            .unwrap();
        assert_eq!(plain.facet, "genre");
        assert_eq!(plain.size, 50);
    }
}
