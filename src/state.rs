use std::collections::BTreeSet;

use crate::color::GenreColorMap;
use crate::data::model::{genre_catalog, AudioFeature, TrackDataset, TrendFeature, ALL_GENRES};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Year-range bounds offered by the Trends sliders.
pub const YEAR_MIN: i32 = 1921;
pub const YEAR_MAX: i32 = 2020;

/// The four dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Trends,
    Recommender,
    Insights,
    About,
}

impl View {
    pub const ALL: [View; 4] = [View::Trends, View::Recommender, View::Insights, View::About];

    pub fn label(self) -> &'static str {
        match self {
            View::Trends => "Trends",
            View::Recommender => "Recommender",
            View::Insights => "Insights",
            View::About => "About",
        }
    }
}

fn default_genres() -> BTreeSet<String> {
    BTreeSet::from([ALL_GENRES.to_string()])
}

/// Widget values of the Trends view.
pub struct TrendsInputs {
    pub genres: BTreeSet<String>,
    pub feature: TrendFeature,
    pub year_start: i32,
    pub year_end: i32,
    /// Render one line per genre instead of the single aggregate line.
    pub split_by_genre: bool,
}

impl Default for TrendsInputs {
    fn default() -> Self {
        Self {
            genres: default_genres(),
            feature: TrendFeature::Popularity,
            year_start: YEAR_MIN,
            year_end: YEAR_MAX,
            split_by_genre: false,
        }
    }
}

/// Widget values of the Recommender view.
pub struct RecommenderInputs {
    pub genres: BTreeSet<String>,
    pub danceability: f64,
    pub energy: f64,
}

impl Default for RecommenderInputs {
    fn default() -> Self {
        Self {
            genres: default_genres(),
            danceability: 0.5,
            energy: 0.5,
        }
    }
}

/// Widget values of the Insights view. The two panels select independently.
pub struct InsightsInputs {
    pub scatter_feature: AudioFeature,
    pub hist_feature: AudioFeature,
}

impl Default for InsightsInputs {
    fn default() -> Self {
        Self {
            scatter_feature: AudioFeature::Danceability,
            hist_feature: AudioFeature::Danceability,
        }
    }
}

/// The full UI state, independent of rendering.
///
/// The dataset is read-only after load; the per-view input structs are the
/// only mutable state, and each view handler receives exactly its own.
pub struct AppState {
    /// Loaded dataset, immutable until replaced wholesale via File → Open….
    pub dataset: TrackDataset,

    /// Which view the sidebar radio currently selects.
    pub view: View,

    pub trends: TrendsInputs,
    pub recommender: RecommenderInputs,
    pub insights: InsightsInputs,

    /// The fixed genre list offered by the filter widgets.
    pub genre_catalog: Vec<String>,

    /// Stable genre → colour assignment for split trend lines.
    pub genre_colors: GenreColorMap,

    /// Error message shown in the top bar after a failed File → Open….
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: TrackDataset) -> Self {
        let genre_catalog = genre_catalog();
        let genre_colors = GenreColorMap::new(&genre_catalog);
        Self {
            dataset,
            view: View::default(),
            trends: TrendsInputs::default(),
            recommender: RecommenderInputs::default(),
            insights: InsightsInputs::default(),
            genre_catalog,
            genre_colors,
            status_message: None,
        }
    }

    /// Replace the dataset after a successful File → Open….
    pub fn set_dataset(&mut self, dataset: TrackDataset) {
        self.dataset = dataset;
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trends_is_the_initial_view() {
        assert_eq!(View::default(), View::Trends);
        assert_eq!(View::ALL[0], View::Trends);
    }

    #[test]
    fn view_inputs_start_at_the_documented_defaults() {
        let trends = TrendsInputs::default();
        assert_eq!(trends.year_start, 1921);
        assert_eq!(trends.year_end, 2020);
        assert!(trends.genres.contains(ALL_GENRES));
        assert!(!trends.split_by_genre);

        let rec = RecommenderInputs::default();
        assert_eq!(rec.danceability, 0.5);
        assert_eq!(rec.energy, 0.5);
        assert!(rec.genres.contains(ALL_GENRES));
    }
}
