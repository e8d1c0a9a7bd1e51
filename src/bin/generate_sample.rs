//! Generates a deterministic `post_covid_health_effects.csv` so the
//! dashboard can be exercised without the real dataset. Roughly 2% of the
//! numeric cells are left blank to exercise missing-value handling.

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn choice<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.range(0, options.len() as i64 - 1) as usize]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_patients = 400;

    let output_path = "post_covid_health_effects.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "Age",
            "Gender",
            "COVID_Severity",
            "Hospitalized",
            "Fatigue_Level",
            "Brain_Fog",
            "Breathing_Issue",
            "Loss_of_Taste_Smell",
            "Mental_Health_Impact",
            "Days_to_Recovery",
            "Long_COVID_Risk",
            "Physical_Activity_Level",
        ])
        .expect("Failed to write header");

    for _ in 0..n_patients {
        let age = rng.range(18, 88);
        let gender = rng.choice(&["Female", "Male", "Other"]);
        let severity = rng.choice(&["Mild", "Mild", "Moderate", "Moderate", "Severe"]);

        // Severity drives everything downstream.
        let (hosp_p, base_recovery, base_fatigue) = match severity {
            "Mild" => (0.05, 14.0, 3.0),
            "Moderate" => (0.30, 28.0, 5.0),
            _ => (0.85, 55.0, 7.5),
        };
        let hospitalized = rng.chance(hosp_p);

        let fatigue = (rng.gauss(base_fatigue, 1.5).round()).clamp(1.0, 10.0);
        let brain_fog = rng.chance(0.12 * base_fatigue);
        let breathing = rng.chance(hosp_p * 0.8 + 0.05);
        let taste_smell = rng.chance(0.35);
        let mental = (rng.gauss(base_fatigue - 0.5, 2.0).round()).clamp(1.0, 10.0);
        let recovery = rng.gauss(base_recovery, 8.0).max(5.0).round();

        // Risk from symptom load, with a little noise.
        let score = fatigue
            + if brain_fog { 2.0 } else { 0.0 }
            + if breathing { 1.5 } else { 0.0 }
            + mental * 0.5
            + rng.gauss(0.0, 1.0);
        let risk = if score > 10.0 {
            "High"
        } else if score > 6.5 {
            "Medium"
        } else {
            "Low"
        };

        let activity = rng.choice(&["Low", "Moderate", "High"]);

        // Occasionally blank out a numeric cell.
        let fatigue_cell = if rng.chance(0.02) {
            String::new()
        } else {
            format!("{fatigue}")
        };
        let mental_cell = if rng.chance(0.02) {
            String::new()
        } else {
            format!("{mental}")
        };
        let recovery_cell = if rng.chance(0.02) {
            String::new()
        } else {
            format!("{recovery}")
        };

        writer
            .write_record([
                age.to_string(),
                gender.to_string(),
                severity.to_string(),
                yes_no(hospitalized).to_string(),
                fatigue_cell,
                yes_no(brain_fog).to_string(),
                yes_no(breathing).to_string(),
                yes_no(taste_smell).to_string(),
                mental_cell,
                recovery_cell,
                risk.to_string(),
                activity.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_patients} patient records to {output_path}");
}
