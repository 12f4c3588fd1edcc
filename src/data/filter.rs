use std::collections::{BTreeMap, BTreeSet};

use super::model::{AudioFeature, Track, TrackDataset, TrendFeature, ALL_GENRES};

// ---------------------------------------------------------------------------
// Filtering and aggregation
//
// Every function here is a pure function from (&TrackDataset, inputs) to
// plain data: the views call them once per frame and hand the result to the
// plotting layer.
// ---------------------------------------------------------------------------

/// Half-width of the recommender's proximity window.
pub const PROXIMITY_WINDOW: f64 = 0.1;

/// Maximum number of rows the recommender returns.
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Number of fixed-width bins in the Insights histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Whether a track passes the genre selection.
///
/// The filter is skipped entirely when the dataset has no genre column or
/// when the "All" sentinel is selected. Otherwise a track passes only if its
/// genre is present and selected; an empty selection matches nothing.
fn genre_matches(dataset: &TrackDataset, selected: &BTreeSet<String>, track: &Track) -> bool {
    if !dataset.has_genre || selected.contains(ALL_GENRES) {
        return true;
    }
    match &track.genre {
        Some(genre) => selected.contains(genre),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

/// Mean of `feature` per year over tracks within `[year_start, year_end]`
/// and the genre selection, as `[year, mean]` points in ascending year
/// order. Years with no contributing rows are absent. An inverted range
/// yields an empty series.
pub fn trend_series(
    dataset: &TrackDataset,
    feature: TrendFeature,
    year_start: i32,
    year_end: i32,
    genres: &BTreeSet<String>,
) -> Vec<[f64; 2]> {
    let mut buckets: BTreeMap<i32, (f64, u32)> = BTreeMap::new();

    for track in &dataset.tracks {
        if track.year < year_start || track.year > year_end {
            continue;
        }
        if !genre_matches(dataset, genres, track) {
            continue;
        }
        let value = feature.value(track);
        if !value.is_finite() {
            continue;
        }
        let bucket = buckets.entry(track.year).or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(year, (sum, count))| [year as f64, sum / count as f64])
        .collect()
}

/// Like [`trend_series`], but one series per genre, keyed by genre name.
///
/// With "All" selected every genre present in the data gets a series; rows
/// without a genre cannot be attributed and are left out.
pub fn trend_series_by_genre(
    dataset: &TrackDataset,
    feature: TrendFeature,
    year_start: i32,
    year_end: i32,
    genres: &BTreeSet<String>,
) -> Vec<(String, Vec<[f64; 2]>)> {
    let take_all = genres.contains(ALL_GENRES);
    let mut buckets: BTreeMap<&str, BTreeMap<i32, (f64, u32)>> = BTreeMap::new();

    for track in &dataset.tracks {
        if track.year < year_start || track.year > year_end {
            continue;
        }
        let Some(genre) = track.genre.as_deref() else {
            continue;
        };
        if !take_all && !genres.contains(genre) {
            continue;
        }
        let value = feature.value(track);
        if !value.is_finite() {
            continue;
        }
        let bucket = buckets
            .entry(genre)
            .or_default()
            .entry(track.year)
            .or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(genre, years)| {
            let points = years
                .into_iter()
                .map(|(year, (sum, count))| [year as f64, sum / count as f64])
                .collect();
            (genre.to_string(), points)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Recommender
// ---------------------------------------------------------------------------

/// Top tracks whose danceability and energy both lie within ±0.1 of the
/// targets (inclusive; bounds deliberately not clamped to [0, 1]), filtered
/// by genre, sorted by popularity descending with ties keeping dataset
/// order, capped at [`RECOMMENDATION_LIMIT`].
pub fn recommend<'a>(
    dataset: &'a TrackDataset,
    genres: &BTreeSet<String>,
    danceability_target: f64,
    energy_target: f64,
) -> Vec<&'a Track> {
    let dance_lo = danceability_target - PROXIMITY_WINDOW;
    let dance_hi = danceability_target + PROXIMITY_WINDOW;
    let energy_lo = energy_target - PROXIMITY_WINDOW;
    let energy_hi = energy_target + PROXIMITY_WINDOW;

    let mut hits: Vec<&Track> = dataset
        .tracks
        .iter()
        .filter(|t| {
            t.danceability >= dance_lo
                && t.danceability <= dance_hi
                && t.energy >= energy_lo
                && t.energy <= energy_hi
                && genre_matches(dataset, genres, t)
        })
        .collect();

    // Stable sort keeps dataset order among equal popularity. Non-finite
    // popularity sorts last.
    fn sort_key(track: &Track) -> f64 {
        if track.popularity.is_finite() {
            track.popularity
        } else {
            f64::NEG_INFINITY
        }
    }
    hits.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));
    hits.truncate(RECOMMENDATION_LIMIT);
    hits
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// `[feature, popularity]` points for every track with finite values in
/// both columns. Always computed over the whole dataset.
pub fn scatter_points(dataset: &TrackDataset, feature: AudioFeature) -> Vec<[f64; 2]> {
    dataset
        .tracks
        .iter()
        .filter_map(|t| {
            let x = feature.value(t);
            let y = t.popularity;
            (x.is_finite() && y.is_finite()).then_some([x, y])
        })
        .collect()
}

/// Fixed-width histogram of one feature over the whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bin_width: f64,
    /// `(bin center, count)` for each of the [`HISTOGRAM_BINS`] bins.
    pub bins: Vec<(f64, usize)>,
}

/// Bin the finite values of `feature` into [`HISTOGRAM_BINS`] equal-width
/// bins over the observed value range. A zero-width range is widened to
/// ±0.5 around the single value so every row still lands in a bin.
pub fn histogram(dataset: &TrackDataset, feature: AudioFeature) -> Histogram {
    let values: Vec<f64> = dataset
        .tracks
        .iter()
        .map(|t| feature.value(t))
        .filter(|v| v.is_finite())
        .collect();

    if values.is_empty() {
        return Histogram {
            bin_width: 0.0,
            bins: Vec::new(),
        };
    }

    let mut lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo <= 0.0 {
        lo -= 0.5;
        hi += 0.5;
    }
    let bin_width = (hi - lo) / HISTOGRAM_BINS as f64;

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for value in &values {
        let idx = ((value - lo) / bin_width) as usize;
        // The maximum value computes to HISTOGRAM_BINS; it belongs to the
        // last bin.
        counts[idx.min(HISTOGRAM_BINS - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (lo + (i as f64 + 0.5) * bin_width, count))
        .collect();

    Histogram { bin_width, bins }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(year: i32, popularity: f64, danceability: f64, energy: f64, genre: Option<&str>) -> Track {
        Track {
            name: format!("track-{year}-{popularity}"),
            artists: "Test Artist".into(),
            year,
            popularity,
            danceability,
            energy,
            valence: 0.5,
            acousticness: 0.5,
            tempo: 120.0,
            duration_ms: 200_000.0,
            genre: genre.map(str::to_string),
        }
    }

    fn dataset(tracks: Vec<Track>, has_genre: bool) -> TrackDataset {
        TrackDataset {
            tracks,
            has_genre,
            dropped_rows: 0,
        }
    }

    fn all() -> BTreeSet<String> {
        BTreeSet::from([ALL_GENRES.to_string()])
    }

    #[test]
    fn trend_mean_per_year() {
        let ds = dataset(
            vec![
                track(1999, 10.0, 0.5, 0.5, None),
                track(1999, 20.0, 0.5, 0.5, None),
                track(2005, 30.0, 0.5, 0.5, None),
            ],
            false,
        );
        let series = trend_series(&ds, TrendFeature::Popularity, 1999, 1999, &all());
        assert_eq!(series, vec![[1999.0, 15.0]]);
    }

    #[test]
    fn inverted_year_range_yields_empty_series() {
        let ds = dataset(vec![track(2000, 50.0, 0.5, 0.5, None)], false);
        let series = trend_series(&ds, TrendFeature::Popularity, 2010, 2000, &all());
        assert!(series.is_empty());
    }

    #[test]
    fn trend_series_is_ascending_by_year() {
        let ds = dataset(
            vec![
                track(2010, 1.0, 0.5, 0.5, None),
                track(1950, 2.0, 0.5, 0.5, None),
                track(1980, 3.0, 0.5, 0.5, None),
            ],
            false,
        );
        let series = trend_series(&ds, TrendFeature::Popularity, 1921, 2020, &all());
        let years: Vec<f64> = series.iter().map(|p| p[0]).collect();
        assert_eq!(years, vec![1950.0, 1980.0, 2010.0]);
    }

    #[test]
    fn non_finite_cells_are_excluded_from_the_mean() {
        let ds = dataset(
            vec![
                track(1999, 10.0, 0.5, 0.5, None),
                track(1999, f64::NAN, 0.5, 0.5, None),
            ],
            false,
        );
        let series = trend_series(&ds, TrendFeature::Popularity, 1999, 1999, &all());
        assert_eq!(series, vec![[1999.0, 10.0]]);
    }

    #[test]
    fn genre_selection_filters_rows() {
        let ds = dataset(
            vec![
                track(2000, 10.0, 0.5, 0.5, Some("Jazz")),
                track(2000, 20.0, 0.5, 0.5, Some("Disco")),
                track(2000, 90.0, 0.5, 0.5, None),
            ],
            true,
        );
        let jazz = BTreeSet::from(["Jazz".to_string()]);
        let series = trend_series(&ds, TrendFeature::Popularity, 1921, 2020, &jazz);
        // Only the Jazz row contributes; the genre-less row is excluded too.
        assert_eq!(series, vec![[2000.0, 10.0]]);
    }

    #[test]
    fn empty_genre_selection_matches_nothing() {
        let ds = dataset(vec![track(2000, 10.0, 0.5, 0.5, Some("Jazz"))], true);
        let none = BTreeSet::new();
        assert!(trend_series(&ds, TrendFeature::Popularity, 1921, 2020, &none).is_empty());
    }

    #[test]
    fn genre_filter_skipped_without_genre_column() {
        let ds = dataset(vec![track(2000, 10.0, 0.5, 0.5, None)], false);
        // A specific selection that matches no row still passes everything
        // through because the dataset has no genre column.
        let jazz = BTreeSet::from(["Jazz".to_string()]);
        let series = trend_series(&ds, TrendFeature::Popularity, 1921, 2020, &jazz);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn split_series_groups_by_genre() {
        let ds = dataset(
            vec![
                track(2000, 10.0, 0.5, 0.5, Some("Jazz")),
                track(2000, 30.0, 0.5, 0.5, Some("Jazz")),
                track(2000, 50.0, 0.5, 0.5, Some("Disco")),
                track(2000, 70.0, 0.5, 0.5, None),
            ],
            true,
        );
        let series = trend_series_by_genre(&ds, TrendFeature::Popularity, 1921, 2020, &all());
        assert_eq!(
            series,
            vec![
                ("Disco".to_string(), vec![[2000.0, 50.0]]),
                ("Jazz".to_string(), vec![[2000.0, 20.0]]),
            ]
        );
    }

    #[test]
    fn recommendations_stay_inside_the_proximity_window() {
        let mut tracks = Vec::new();
        for i in 0..40 {
            let v = i as f64 / 40.0;
            tracks.push(track(2000, i as f64, v, v, None));
        }
        let ds = dataset(tracks, false);
        let hits = recommend(&ds, &all(), 0.5, 0.5);

        assert!(hits.len() <= RECOMMENDATION_LIMIT);
        assert!(!hits.is_empty());
        for t in &hits {
            assert!(t.danceability >= 0.4 && t.danceability <= 0.6);
            assert!(t.energy >= 0.4 && t.energy <= 0.6);
        }
        for pair in hits.windows(2) {
            assert!(pair[0].popularity >= pair[1].popularity);
        }
    }

    #[test]
    fn zero_target_keeps_rows_at_the_low_end() {
        let ds = dataset(
            vec![
                track(2000, 10.0, 0.0, 0.05, None),
                track(2000, 20.0, 0.1, 0.0, None),
                track(2000, 30.0, 0.11, 0.0, None),
            ],
            false,
        );
        let hits = recommend(&ds, &all(), 0.0, 0.0);
        // The −0.1 lower bound matches nothing below zero but must not
        // exclude rows in [0, 0.1].
        assert_eq!(hits.len(), 2);
        for t in &hits {
            assert!(t.danceability <= 0.1);
        }
    }

    #[test]
    fn equal_popularity_keeps_dataset_order() {
        let ds = dataset(
            vec![
                track(2000, 50.0, 0.5, 0.5, None),
                track(2001, 50.0, 0.5, 0.5, None),
                track(2002, 50.0, 0.5, 0.5, None),
            ],
            false,
        );
        let hits = recommend(&ds, &all(), 0.5, 0.5);
        let years: Vec<i32> = hits.iter().map(|t| t.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002]);
    }

    #[test]
    fn recommendations_are_capped_at_ten() {
        let tracks = (0..25)
            .map(|i| track(2000, i as f64, 0.5, 0.5, None))
            .collect();
        let ds = dataset(tracks, false);
        let hits = recommend(&ds, &all(), 0.5, 0.5);
        assert_eq!(hits.len(), RECOMMENDATION_LIMIT);
        assert_eq!(hits[0].popularity, 24.0);
    }

    #[test]
    fn insights_ignore_other_views_inputs() {
        // Scatter and histogram always run over the whole dataset; a genre
        // or year restriction elsewhere must not change them.
        let ds = dataset(
            vec![
                track(1950, 10.0, 0.2, 0.5, Some("Jazz")),
                track(2010, 90.0, 0.8, 0.5, Some("Disco")),
            ],
            true,
        );
        assert_eq!(scatter_points(&ds, AudioFeature::Danceability).len(), 2);
        let hist = histogram(&ds, AudioFeature::Danceability);
        let total: usize = hist.bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn histogram_has_thirty_bins_covering_every_row() {
        let tracks = (0..100)
            .map(|i| track(2000, 50.0, i as f64 / 100.0, 0.5, None))
            .collect();
        let ds = dataset(tracks, false);
        let hist = histogram(&ds, AudioFeature::Danceability);

        assert_eq!(hist.bins.len(), HISTOGRAM_BINS);
        let total: usize = hist.bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn histogram_widens_a_degenerate_range() {
        let tracks = (0..5).map(|_| track(2000, 50.0, 0.7, 0.5, None)).collect();
        let ds = dataset(tracks, false);
        let hist = histogram(&ds, AudioFeature::Danceability);
        let total: usize = hist.bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 5);
        assert!(hist.bin_width > 0.0);
    }

    #[test]
    fn aggregations_are_idempotent() {
        let ds = dataset(
            vec![
                track(1999, 10.0, 0.5, 0.5, Some("Jazz")),
                track(2005, 30.0, 0.4, 0.6, Some("Disco")),
            ],
            true,
        );
        let first = trend_series(&ds, TrendFeature::Energy, 1921, 2020, &all());
        let second = trend_series(&ds, TrendFeature::Energy, 1921, 2020, &all());
        assert_eq!(first, second);

        let h1 = histogram(&ds, AudioFeature::Tempo);
        let h2 = histogram(&ds, AudioFeature::Tempo);
        assert_eq!(h1, h2);
    }
}
