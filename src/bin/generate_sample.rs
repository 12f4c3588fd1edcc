use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xorshift64*), so repeated runs produce the
/// same dataset.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

const TITLE_HEADS: [&str; 12] = [
    "Midnight", "Electric", "Golden", "Broken", "Silver", "Neon", "Velvet", "Wild", "Lonely",
    "Crystal", "Burning", "Silent",
];

const TITLE_TAILS: [&str; 12] = [
    "Avenue", "Hearts", "Summer", "Echoes", "River", "Skyline", "Dreams", "Motel", "Parade",
    "Horizon", "Letters", "Mirrors",
];

const ARTISTS: [&str; 10] = [
    "The Paper Kites",
    "Luna Vale",
    "Marco Reyes",
    "Delta Motive",
    "Ivy & June",
    "Kofi Mensah",
    "Northern Lights Trio",
    "Sofia Marchetti",
    "Greyhound City",
    "Ada Kwan",
];

// A slice of the dashboard's genre catalog, enough to exercise the filters.
const GENRES: [&str; 12] = [
    "Blues",
    "Classical music",
    "Country music",
    "Disco",
    "Electronic music",
    "Folk music",
    "Hip-hop",
    "Jazz",
    "Pop music",
    "Reggae",
    "Rock and roll",
    "Soul music",
];

const OUTPUT_PATH: &str = "tracks.csv";
const ROWS: usize = 400;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut writer =
        csv::Writer::from_path(OUTPUT_PATH).with_context(|| format!("creating {OUTPUT_PATH}"))?;
    writer.write_record([
        "name",
        "artists",
        "release_date",
        "popularity",
        "danceability",
        "energy",
        "valence",
        "acousticness",
        "tempo",
        "duration_ms",
        "genre",
    ])?;

    for _ in 0..ROWS {
        let name = format!("{} {}", rng.pick(&TITLE_HEADS), rng.pick(&TITLE_TAILS));
        let artists = rng.pick(&ARTISTS).to_string();

        let year = 1921 + (rng.next_u64() % 100) as i32;
        let release_date = if rng.chance(0.02) {
            // A few malformed dates so the loader's drop policy has work.
            "unknown".to_string()
        } else if rng.chance(0.3) {
            year.to_string()
        } else {
            let month = 1 + (rng.next_u64() % 12) as u32;
            let day = 1 + (rng.next_u64() % 28) as u32;
            format!("{year:04}-{month:02}-{day:02}")
        };

        // Danceable tracks tend to carry more energy; keep the correlation
        // mild so scatter plots stay interesting.
        let danceability = rng.range(0.0, 1.0);
        let energy = (danceability * 0.5 + rng.range(0.0, 0.5)).clamp(0.0, 1.0);

        // Popularity drifts upward for recent decades.
        let recency = (year - 1921) as f64 / 100.0;
        let popularity = (rng.range(0.0, 70.0) + recency * 30.0).round();

        let genre = if rng.chance(0.1) {
            String::new()
        } else {
            rng.pick(&GENRES).to_string()
        };

        writer.write_record([
            name,
            artists,
            release_date,
            format!("{popularity}"),
            format!("{danceability:.3}"),
            format!("{energy:.3}"),
            format!("{:.3}", rng.range(0.0, 1.0)),
            format!("{:.3}", rng.range(0.0, 1.0)),
            format!("{:.1}", rng.range(60.0, 200.0)),
            format!("{}", (rng.range(90_000.0, 360_000.0) as u64)),
            genre,
        ])?;
    }

    writer.flush()?;
    println!("Wrote {ROWS} tracks to {OUTPUT_PATH}");
    Ok(())
}
