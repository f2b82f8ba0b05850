//! 2025 calendar circuits and their characteristics.

use serde::Serialize;

use paddock_core::PaddockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize)]
pub struct Circuit {
    #[serde(skip)]
    pub key: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub city: &'static str,
    pub length_km: f64,
    pub corners: u8,
    pub drs_zones: u8,
    pub characteristics: &'static [&'static str],
    pub lap_record: &'static str,
    pub difficulty: Difficulty,
}

impl Circuit {
    pub fn has(&self, characteristic: &str) -> bool {
        self.characteristics.contains(&characteristic)
    }

    /// `#SilverstoneCircuit` style tag built from the circuit name.
    pub fn hashtag(&self) -> String {
        let compact: String = self
            .name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        format!("#{compact}")
    }

    /// Up to three racing challenges implied by the layout.
    pub fn challenges(&self) -> Vec<&'static str> {
        let mut challenges = Vec::new();
        if self.has("narrow") {
            challenges.extend(["track positioning crucial", "limited overtaking"]);
        }
        if self.has("high-speed") {
            challenges.extend(["aerodynamic efficiency key", "slipstream battles"]);
        }
        if self.has("street-circuit") {
            challenges.extend(["barrier proximity", "no run-off areas"]);
        }
        if self.has("weather-unpredictable") {
            challenges.extend(["weather decisions critical", "tyre strategy complex"]);
        }
        if challenges.is_empty() {
            challenges.extend(["setup challenges", "tyre management"]);
        }
        challenges.truncate(3);
        challenges
    }
}

/// Circuit used when a session starts without an explicit choice.
pub const DEFAULT_CIRCUIT: &str = "silverstone";

static CIRCUITS: [Circuit; 24] = [
    Circuit {
        key: "australia",
        name: "Albert Park Circuit",
        country: "Australia",
        city: "Melbourne",
        length_km: 5.278,
        corners: 14,
        drs_zones: 4,
        characteristics: &["semi-street", "fast", "bumpy", "unpredictable-weather"],
        lap_record: "1:20.260 (Charles Leclerc, 2022)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "china",
        name: "Shanghai International Circuit",
        country: "China",
        city: "Shanghai",
        length_km: 5.451,
        corners: 16,
        drs_zones: 2,
        characteristics: &["long-straights", "technical", "overtaking-opportunities"],
        lap_record: "1:32.238 (Michael Schumacher, 2004)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "japan",
        name: "Suzuka International Racing Course",
        country: "Japan",
        city: "Suzuka",
        length_km: 5.807,
        corners: 18,
        drs_zones: 2,
        characteristics: &["figure-eight", "technical", "challenging", "130r-corner"],
        lap_record: "1:30.983 (Lewis Hamilton, 2019)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "bahrain",
        name: "Bahrain International Circuit",
        country: "Bahrain",
        city: "Sakhir",
        length_km: 5.412,
        corners: 15,
        drs_zones: 3,
        characteristics: &["high-speed", "desert", "night-race", "overtaking-opportunities"],
        lap_record: "1:31.447 (Pedro de la Rosa, 2005)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "saudi_arabia",
        name: "Jeddah Corniche Circuit",
        country: "Saudi Arabia",
        city: "Jeddah",
        length_km: 6.174,
        corners: 27,
        drs_zones: 3,
        characteristics: &["street-circuit", "high-speed", "narrow", "dangerous"],
        lap_record: "1:30.734 (Lewis Hamilton, 2021)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "miami",
        name: "Miami International Autodrome",
        country: "United States",
        city: "Miami",
        length_km: 5.412,
        corners: 19,
        drs_zones: 3,
        characteristics: &["street-circuit", "hot", "showbiz", "long-straights"],
        lap_record: "1:29.708 (Max Verstappen, 2023)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "imola",
        name: "Autodromo Enzo e Dino Ferrari",
        country: "Italy",
        city: "Imola",
        length_km: 4.909,
        corners: 19,
        drs_zones: 1,
        characteristics: &["historic", "technical", "fast chicanes"],
        lap_record: "1:15.484 (Lewis Hamilton, 2020)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "monaco",
        name: "Circuit de Monaco",
        country: "Monaco",
        city: "Monte Carlo",
        length_km: 3.337,
        corners: 19,
        drs_zones: 1,
        characteristics: &["street-circuit", "narrow", "prestigious", "difficult-overtaking"],
        lap_record: "1:12.909 (Lewis Hamilton, 2019)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "spain",
        name: "Circuit de Barcelona-Catalunya",
        country: "Spain",
        city: "Barcelona",
        length_km: 4.675,
        corners: 14,
        drs_zones: 2,
        characteristics: &["testing-circuit", "balanced", "aero-demanding"],
        lap_record: "1:18.149 (Max Verstappen, 2023)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "canada",
        name: "Circuit Gilles Villeneuve",
        country: "Canada",
        city: "Montreal",
        length_km: 4.361,
        corners: 14,
        drs_zones: 3,
        characteristics: &["stop-go", "walls", "late-braking", "Wall of Champions"],
        lap_record: "1:13.078 (Valtteri Bottas, 2019)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "austria",
        name: "Red Bull Ring",
        country: "Austria",
        city: "Spielberg",
        length_km: 4.318,
        corners: 10,
        drs_zones: 3,
        characteristics: &["short-lap", "elevation", "power-track"],
        lap_record: "1:05.619 (Carlos Sainz, 2020)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "silverstone",
        name: "Silverstone Circuit",
        country: "United Kingdom",
        city: "Silverstone",
        length_km: 5.891,
        corners: 18,
        drs_zones: 2,
        characteristics: &["high-speed", "historic", "home-of-f1", "challenging-corners"],
        lap_record: "1:27.097 (Max Verstappen, 2020)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "spa",
        name: "Circuit de Spa-Francorchamps",
        country: "Belgium",
        city: "Stavelot",
        length_km: 7.004,
        corners: 20,
        drs_zones: 2,
        characteristics: &["longest-circuit", "historic", "eau-rouge", "weather-unpredictable"],
        lap_record: "1:46.286 (Valtteri Bottas, 2018)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "hungary",
        name: "Hungaroring",
        country: "Hungary",
        city: "Budapest",
        length_km: 4.381,
        corners: 14,
        drs_zones: 1,
        characteristics: &["twisty", "slow", "technical"],
        lap_record: "1:16.627 (Lewis Hamilton, 2020)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "netherlands",
        name: "Circuit Zandvoort",
        country: "Netherlands",
        city: "Zandvoort",
        length_km: 4.259,
        corners: 14,
        drs_zones: 2,
        characteristics: &["banked-corners", "narrow", "technical"],
        lap_record: "1:11.097 (Lewis Hamilton, 2021)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "monza",
        name: "Autodromo Nazionale di Monza",
        country: "Italy",
        city: "Monza",
        length_km: 5.793,
        corners: 11,
        drs_zones: 3,
        characteristics: &["temple-of-speed", "low-downforce", "historic", "passionate-fans"],
        lap_record: "1:21.046 (Rubens Barrichello, 2004)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "baku",
        name: "Baku City Circuit",
        country: "Azerbaijan",
        city: "Baku",
        length_km: 6.003,
        corners: 20,
        drs_zones: 2,
        characteristics: &["street-circuit", "long-straight", "castle-section"],
        lap_record: "1:43.009 (Charles Leclerc, 2019)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "singapore",
        name: "Marina Bay Street Circuit",
        country: "Singapore",
        city: "Singapore",
        length_km: 4.940,
        corners: 19,
        drs_zones: 2,
        characteristics: &["night-race", "street-circuit", "humid"],
        lap_record: "1:41.905 (Kevin Magnussen, 2018)",
        difficulty: Difficulty::High,
    },
    Circuit {
        key: "austin",
        name: "Circuit of the Americas",
        country: "United States",
        city: "Austin",
        length_km: 5.513,
        corners: 20,
        drs_zones: 2,
        characteristics: &["modern", "elevation", "fast-sweepers"],
        lap_record: "1:36.169 (Charles Leclerc, 2019)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "mexico",
        name: "Autódromo Hermanos Rodríguez",
        country: "Mexico",
        city: "Mexico City",
        length_km: 4.304,
        corners: 17,
        drs_zones: 2,
        characteristics: &["high-altitude", "long-straight", "stadium-section"],
        lap_record: "1:17.774 (Valtteri Bottas, 2021)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "brazil",
        name: "Autódromo José Carlos Pace",
        country: "Brazil",
        city: "São Paulo",
        length_km: 4.309,
        corners: 15,
        drs_zones: 2,
        characteristics: &["anti-clockwise", "elevation-changes", "passionate-fans", "unpredictable-weather"],
        lap_record: "1:10.540 (Valtteri Bottas, 2018)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "las_vegas",
        name: "Las Vegas Strip Circuit",
        country: "United States",
        city: "Las Vegas",
        length_km: 6.201,
        corners: 17,
        drs_zones: 3,
        characteristics: &["street-circuit", "night-race", "long-straights", "showbiz"],
        lap_record: "1:35.490 (Oscar Piastri, 2023)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "qatar",
        name: "Lusail International Circuit",
        country: "Qatar",
        city: "Lusail",
        length_km: 5.419,
        corners: 16,
        drs_zones: 2,
        characteristics: &["night-race", "fast", "desert"],
        lap_record: "1:23.196 (Max Verstappen, 2021)",
        difficulty: Difficulty::Medium,
    },
    Circuit {
        key: "abu_dhabi",
        name: "Yas Marina Circuit",
        country: "United Arab Emirates",
        city: "Abu Dhabi",
        length_km: 5.281,
        corners: 16,
        drs_zones: 2,
        characteristics: &["twilight-race", "modern-facilities", "title-decider", "marina"],
        lap_record: "1:26.103 (Max Verstappen, 2021)",
        difficulty: Difficulty::Medium,
    },
];

/// All circuits in calendar order.
pub fn circuits() -> &'static [Circuit] {
    &CIRCUITS
}

pub fn circuit(key: &str) -> Option<&'static Circuit> {
    CIRCUITS.iter().find(|c| c.key == key)
}

/// Look up a circuit, rejecting unknown keys as a validation failure.
pub fn require_circuit(key: &str) -> Result<&'static Circuit, PaddockError> {
    circuit(key.trim())
        .ok_or_else(|| PaddockError::validation(format!("invalid circuit: {key}")))
}
