use anyhow::{Context, Result};
use serde::Serialize;

/// One CSV row in the layout the viewer loads.
#[derive(Serialize)]
struct Row {
    show_id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    title: String,
    director: String,
    cast: String,
    country: &'static str,
    date_added: String,
    year_added: i32,
    release_year: i32,
    rating: &'static str,
    duration: String,
    listed_in: String,
    description: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];
const COUNTRIES: [&str; 6] = ["United States", "India", "United Kingdom", "Japan", "South Korea", "Spain"];
const MOVIE_RATINGS: [&str; 6] = ["G", "PG", "PG-13", "R", "TV-14", "TV-MA"];
const TV_RATINGS: [&str; 5] = ["TV-Y", "TV-Y7", "TV-PG", "TV-14", "TV-MA"];
const GENRES: [&str; 6] = ["Dramas", "Comedies", "Documentaries", "Action & Adventure", "International TV Shows", "Kids' TV"];
const PEOPLE: [&str; 6] = ["Ama Qamata", "Khosi Ngema", "Gail Mabalane", "Sami Bouajila", "Tracy Gotoas", "Samuel Jouy"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_catalog.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    let n_titles = 500;
    for i in 0..n_titles {
        let is_movie = rng.below(10) < 7;
        let release_year = 1960 + rng.below(62) as i32;
        let year_added = (release_year.max(2008) + rng.below(4) as i32).min(2021);
        let month = rng.pick(&MONTHS);
        let day = 1 + rng.below(28);

        let (kind, rating, duration) = if is_movie {
            ("Movie", *rng.pick(&MOVIE_RATINGS), format!("{} min", 60 + rng.below(120)))
        } else {
            let seasons = 1 + rng.below(6);
            let unit = if seasons == 1 { "Season" } else { "Seasons" };
            ("TV Show", *rng.pick(&TV_RATINGS), format!("{seasons} {unit}"))
        };

        let cast = (0..1 + rng.below(3))
            .map(|_| *rng.pick(&PEOPLE))
            .collect::<Vec<_>>()
            .join(", ");

        writer
            .serialize(Row {
                show_id: format!("s{}", i + 1),
                kind,
                title: format!("Sample Title {}", i + 1),
                director: if is_movie { rng.pick(&PEOPLE).to_string() } else { String::new() },
                cast,
                country: *rng.pick(&COUNTRIES),
                date_added: format!("{month} {day}, {year_added}"),
                year_added,
                release_year,
                rating,
                duration,
                listed_in: rng.pick(&GENRES).to_string(),
                description: format!("Synthetic catalog entry number {}.", i + 1),
            })
            .with_context(|| format!("writing row {i}"))?;
    }

    writer.flush().context("flushing output file")?;
    println!("Wrote {n_titles} titles to {output_path}");
    Ok(())
}
