use std::path::Path;

use anyhow::{Context, Result};

fn gaussian_pair(rng: &mut SimpleRng, center: (f64, f64), spread: (f64, f64)) -> (f64, f64) {
    (
        rng.gauss(center.0, spread.0).max(0.0),
        rng.gauss(center.1, spread.1).max(0.0),
    )
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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Writes `sample_data.tsv`: three overlapping populations, one per state.
fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (state, count, (cpm, intensity) center, spread)
    let populations = [
        (1, 400, (20.0, 150.0), (8.0, 60.0)),
        (2, 250, (60.0, 600.0), (15.0, 150.0)),
        (3, 100, (40.0, 350.0), (20.0, 200.0)),
    ];

    let output_path = Path::new("sample_data.tsv");
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(["name", "cpm", "intensity", "state"])?;

    let mut row_id = 0usize;
    for &(state, count, center, spread) in &populations {
        for _ in 0..count {
            let (cpm, intensity) = gaussian_pair(&mut rng, center, spread);
            writer.write_record([
                format!("sample_{row_id:04}"),
                format!("{cpm:.3}"),
                format!("{intensity:.3}"),
                state.to_string(),
            ])?;
            row_id += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {row_id} samples to {}", output_path.display());
    Ok(())
}
