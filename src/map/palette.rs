use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const PALETTE: [&str; 13] = [
    "#b71c1c", "#4a148c", "#2e7d32", "#e65100", "#2962ff", "#c2185b", "#ffcd00", "#3e2723",
    "#03a9f4", "#827717", "#00bfa5", "#6200ea", "#ff6d00",
];

/// Random path colors. Repeats across concurrent paths are allowed.
#[derive(Debug)]
pub struct ColorPicker {
    rng: StdRng,
}

impl ColorPicker {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn pick(&mut self) -> String {
        let mut colors = PALETTE;
        colors.shuffle(&mut self.rng);

        colors[0].to_string()
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}
