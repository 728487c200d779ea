use std::io::Write;

use serde::Serialize;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const ACTORS: [&str; 12] = [
    "Anupam Kher", "Shah Rukh Khan", "Takahiro Sakurai", "Julie Tejwani", "Naseeruddin Shah",
    "Om Puri", "Yuki Kaji", "Rupa Bhimani", "Akshay Kumar", "Paresh Rawal", "Boman Irani",
    "Vincent Tong",
];
const DIRECTORS: [&str; 8] = [
    "Rajiv Chilaka", "Raúl Campos", "Jan Suter", "Suhas Kadav", "Marcus Raboy", "Jay Karas",
    "Cathy Garcia-Molina", "Martin Scorsese",
];
const COUNTRIES: [&str; 10] = [
    "United States", "India", "United Kingdom", "Canada", "France", "Japan", "Spain",
    "South Korea", "Germany", "Mexico",
];

#[derive(Serialize)]
struct Row {
    show_id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    title: String,
    director: String,
    cast: String,
    country: String,
    date_added: String,
    release_year: i64,
    rating: &'static str,
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Up to `max` distinct entries joined with ", "; empty one time in five.
    fn credits(&mut self, items: &[&str], max: usize) -> String {
        if self.below(5) == 0 {
            return String::new();
        }
        let mut chosen: Vec<&str> = Vec::new();
        for _ in 0..1 + self.below(max) {
            let item = self.pick(items);
            if !chosen.contains(&item) {
                chosen.push(item);
            }
        }
        chosen.join(", ")
    }
}

/// Write `n_rows` synthetic titles as CSV. The same seed always yields the same bytes.
fn write_sample<W: Write>(out: W, seed: u64, n_rows: usize) -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(seed);
    let mut writer = csv::Writer::from_writer(out);

    for i in 0..n_rows {
        let movie = rng.below(10) < 7;
        let release_year = 1990 + rng.below(32) as i64;
        let added_year = (release_year + rng.below(4) as i64).clamp(2008, 2021);
        let date_added = if rng.below(50) == 0 {
            String::new()
        } else {
            format!(
                "{} {}, {added_year}",
                rng.pick(&MONTHS),
                1 + rng.below(28)
            )
        };

        writer.serialize(Row {
            show_id: format!("s{}", i + 1),
            kind: if movie { "Movie" } else { "TV Show" },
            title: format!("Sample Title {}", i + 1),
            director: rng.credits(&DIRECTORS, 2),
            cast: rng.credits(&ACTORS, 4),
            country: rng.credits(&COUNTRIES, 2),
            date_added,
            release_year,
            rating: if movie { "PG-13" } else { "TV-MA" },
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let output_path = "netflix.csv";
    let n_rows = 500;
    let file = std::fs::File::create(output_path)?;
    write_sample(file, 42, n_rows)?;

    println!("Wrote {n_rows} titles to {output_path}");
    Ok(())
}
