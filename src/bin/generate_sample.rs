//! Writes a deterministic sample cluster table to the dashboard's default
//! input path, for local runs without the real upstream export.

/// Minimal deterministic PRNG (splitmix64).
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal jitter around cluster centroids.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One cluster archetype: (danceability, energy, valence, tempo) centroid
/// plus the genres its songs draw from.
struct Archetype {
    centroid: [f64; 4],
    genres: &'static [&'static str],
}

const ARCHETYPES: [Archetype; 5] = [
    Archetype {
        centroid: [0.82, 0.72, 0.78, 121.0],
        genres: &["pop", "dance pop", "electropop"],
    },
    Archetype {
        centroid: [0.45, 0.32, 0.48, 96.0],
        genres: &["folk", "singer-songwriter", "acoustic"],
    },
    Archetype {
        centroid: [0.48, 0.94, 0.38, 148.0],
        genres: &["metal", "hard rock", "punk"],
    },
    Archetype {
        centroid: [0.62, 0.34, 0.56, 82.0],
        genres: &["lo-fi", "chillhop", "ambient"],
    },
    Archetype {
        centroid: [0.76, 0.80, 0.88, 104.0],
        genres: &["latin", "reggaeton", "salsa"],
    },
];

const TITLE_WORDS: [&str; 8] = [
    "Midnight", "Golden", "Electric", "Silent", "Neon", "Velvet", "Broken", "Summer",
];
const TITLE_NOUNS: [&str; 8] = [
    "River", "Heart", "City", "Dream", "Echo", "Road", "Fire", "Sky",
];
const ARTIST_NAMES: [&str; 10] = [
    "The Vantage", "Mara Quinn", "Static Bloom", "Iron Meadow", "Nova Pines",
    "Cold Harbor", "June Atlas", "Paper Lions", "Red Delta", "Glass Animals Tribute",
];

fn main() {
    let mut rng = SampleRng::new(42);
    let output_path = "amazon_music_clusters_all_methods.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "name_song",
            "name_artist",
            "danceability",
            "energy",
            "valence",
            "tempo",
            "genres",
            "cluster",
            "cluster_dbscan",
            "cluster_hc",
        ])
        .expect("Failed to write header");

    let n_songs = 360;
    for i in 0..n_songs {
        let cluster = rng.below(ARCHETYPES.len());
        let archetype = &ARCHETYPES[cluster];

        let danceability = rng.gauss(archetype.centroid[0], 0.06).clamp(0.0, 1.0);
        let energy = rng.gauss(archetype.centroid[1], 0.06).clamp(0.0, 1.0);
        let valence = rng.gauss(archetype.centroid[2], 0.08).clamp(0.0, 1.0);
        let tempo = rng.gauss(archetype.centroid[3], 7.0).max(40.0);

        let genre = archetype.genres[rng.below(archetype.genres.len())];
        let title = format!(
            "{} {} #{:03}",
            TITLE_WORDS[rng.below(TITLE_WORDS.len())],
            TITLE_NOUNS[rng.below(TITLE_NOUNS.len())],
            i
        );
        let artist = ARTIST_NAMES[rng.below(ARTIST_NAMES.len())];

        // DBSCAN marks ~12% of rows as noise (no label); hierarchical merges
        // the five archetypes into three groups and skips ~5%.
        let dbscan = if rng.next_f64() < 0.12 {
            String::new()
        } else {
            cluster.to_string()
        };
        let hc = if rng.next_f64() < 0.05 {
            String::new()
        } else {
            (cluster / 2).to_string()
        };

        let record = vec![
            title,
            artist.to_string(),
            format!("{danceability:.4}"),
            format!("{energy:.4}"),
            format!("{valence:.4}"),
            format!("{tempo:.2}"),
            genre.to_string(),
            cluster.to_string(),
            dbscan,
            hc,
        ];
        writer.write_record(&record).expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_songs} songs to {output_path}");
}
