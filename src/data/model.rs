// ---------------------------------------------------------------------------
// Track – one row of the source dataset
// ---------------------------------------------------------------------------

/// A single track (one row of the source file).
///
/// Numeric cells that were missing or unparseable in the source are stored as
/// `f64::NAN`; every aggregation in [`super::filter`] skips non-finite values,
/// so a bad cell drops the row from that computation only.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub artists: String,
    /// Release year, derived from the source's `release_date` column.
    pub year: i32,
    pub popularity: f64,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub tempo: f64,
    pub duration_ms: f64,
    /// Absent when the source has no genre column or the cell was empty.
    pub genre: Option<String>,
}

// ---------------------------------------------------------------------------
// TrackDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after loading; every retained row has
/// a valid `year`.
#[derive(Debug, Clone)]
pub struct TrackDataset {
    /// All tracks (rows), in source order.
    pub tracks: Vec<Track>,
    /// Whether the source file carried a genre column at all. When false,
    /// genre filtering is skipped everywhere.
    pub has_genre: bool,
    /// Rows discarded during load because `release_date` would not parse.
    pub dropped_rows: usize,
}

impl TrackDataset {
    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Feature selectors
// ---------------------------------------------------------------------------

/// The features the Trends view can aggregate over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendFeature {
    Popularity,
    Danceability,
    Energy,
    DurationMs,
}

impl TrendFeature {
    pub const ALL: [TrendFeature; 4] = [
        TrendFeature::Popularity,
        TrendFeature::Danceability,
        TrendFeature::Energy,
        TrendFeature::DurationMs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrendFeature::Popularity => "Popularity",
            TrendFeature::Danceability => "Danceability",
            TrendFeature::Energy => "Energy",
            TrendFeature::DurationMs => "Duration (ms)",
        }
    }

    pub fn value(self, track: &Track) -> f64 {
        match self {
            TrendFeature::Popularity => track.popularity,
            TrendFeature::Danceability => track.danceability,
            TrendFeature::Energy => track.energy,
            TrendFeature::DurationMs => track.duration_ms,
        }
    }
}

/// The audio features the Insights view compares against popularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFeature {
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Tempo,
}

impl AudioFeature {
    pub const ALL: [AudioFeature; 5] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Valence,
        AudioFeature::Acousticness,
        AudioFeature::Tempo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AudioFeature::Danceability => "Danceability",
            AudioFeature::Energy => "Energy",
            AudioFeature::Valence => "Valence",
            AudioFeature::Acousticness => "Acousticness",
            AudioFeature::Tempo => "Tempo",
        }
    }

    pub fn value(self, track: &Track) -> f64 {
        match self {
            AudioFeature::Danceability => track.danceability,
            AudioFeature::Energy => track.energy,
            AudioFeature::Valence => track.valence,
            AudioFeature::Acousticness => track.acousticness,
            AudioFeature::Tempo => track.tempo,
        }
    }
}

// ---------------------------------------------------------------------------
// Genre catalog
// ---------------------------------------------------------------------------

/// Sentinel catalog entry meaning "no genre filter applied".
pub const ALL_GENRES: &str = "All";

/// Hand-curated genre names offered by the filter widgets. The dataset may
/// contain genres outside this list; those rows only surface under "All".
const GENRE_NAMES: [&str; 60] = [
    "Alternative rock",
    "Ambient music",
    "American folk music",
    "Avant-garde music",
    "Bhangra",
    "Blues",
    "Bollywood",
    "Carnatic music",
    "Children's music",
    "Christian music",
    "Classical music",
    "Corridos",
    "Country music",
    "Cumbia",
    "Dance music",
    "Disco",
    "Easy listening",
    "Electronic dance music",
    "Electronic music",
    "Experimental music",
    "Flamenco",
    "Folk music",
    "Funk",
    "Grupero",
    "Hard rock",
    "Heavy metal",
    "Hindustani classical music",
    "Hip-hop culture",
    "Hip-hop",
    "Indie rock",
    "Indian classical music",
    "Jazz fusion",
    "Jazz",
    "K-pop",
    "Latin music",
    "Mariachi",
    "Music of Asia",
    "Music of Latin America",
    "New wave",
    "New-age music",
    "Norteño",
    "Pop music",
    "Pop rock",
    "Popular music",
    "Post-punk",
    "Progressive rock",
    "Punk rock",
    "Ranchera",
    "Reggae",
    "Reggaeton",
    "Rhythm and blues",
    "Rock and roll",
    "Salsa",
    "Ska",
    "Soul music",
    "Synth-pop",
    "Techno",
    "Vaporwave",
    "Vocal music",
    "World music",
];

/// The genre list offered by the UI: alphabetically sorted, with the
/// [`ALL_GENRES`] sentinel always first.
pub fn genre_catalog() -> Vec<String> {
    let mut names: Vec<String> = GENRE_NAMES.iter().map(|s| s.to_string()).collect();
    names.sort();

    let mut catalog = Vec::with_capacity(names.len() + 1);
    catalog.push(ALL_GENRES.to_string());
    catalog.extend(names);
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_starts_with_all_then_sorted() {
        let catalog = genre_catalog();
        assert_eq!(catalog[0], ALL_GENRES);
        let rest = &catalog[1..];
        let mut sorted = rest.to_vec();
        sorted.sort();
        assert_eq!(rest, &sorted[..]);
    }

    #[test]
    fn catalog_has_no_duplicates() {
        let catalog = genre_catalog();
        let unique: std::collections::BTreeSet<&String> = catalog.iter().collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn feature_selectors_read_the_right_column() {
        let track = Track {
            name: "t".into(),
            artists: "a".into(),
            year: 2000,
            popularity: 55.0,
            danceability: 0.1,
            energy: 0.2,
            valence: 0.3,
            acousticness: 0.4,
            tempo: 120.0,
            duration_ms: 180_000.0,
            genre: None,
        };
        assert_eq!(TrendFeature::DurationMs.value(&track), 180_000.0);
        assert_eq!(AudioFeature::Tempo.value(&track), 120.0);
        assert_eq!(AudioFeature::Valence.value(&track), 0.3);
    }
}
