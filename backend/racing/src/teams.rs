//! 2025 teams and drivers.

use serde::Serialize;

use paddock_core::TeamKey;

use crate::results::PerformanceTier;

#[derive(Debug, Serialize)]
pub struct Team {
    pub key: TeamKey,
    pub name: &'static str,
    pub short_name: &'static str,
    pub engine: &'static str,
    pub principal: &'static str,
    pub drivers: [&'static str; 2],
    pub colors: &'static [&'static str],
    pub championship_wins: u32,
    #[serde(skip)]
    pub tier: PerformanceTier,
}

static TEAMS: [Team; 9] = [
    Team {
        key: TeamKey::RedBull,
        name: "Red Bull Racing",
        short_name: "RBR",
        engine: "Honda RBPT",
        principal: "Christian Horner",
        drivers: ["Max Verstappen", "Liam Lawson"],
        colors: &["navy", "red", "yellow"],
        championship_wins: 6,
        tier: PerformanceTier::TopTeam,
    },
    Team {
        key: TeamKey::Ferrari,
        name: "Scuderia Ferrari",
        short_name: "Ferrari",
        engine: "Ferrari",
        principal: "Frédéric Vasseur",
        drivers: ["Charles Leclerc", "Lewis Hamilton"],
        colors: &["red"],
        championship_wins: 16,
        tier: PerformanceTier::TopTeam,
    },
    Team {
        key: TeamKey::Mercedes,
        name: "Mercedes-AMG Petronas F1 Team",
        short_name: "Mercedes",
        engine: "Mercedes",
        principal: "Toto Wolff",
        drivers: ["George Russell", "Kimi Antonelli"],
        colors: &["silver", "black", "turquoise"],
        championship_wins: 8,
        tier: PerformanceTier::TopTeam,
    },
    Team {
        key: TeamKey::Mclaren,
        name: "McLaren F1 Team",
        short_name: "McLaren",
        engine: "Mercedes",
        principal: "Andrea Stella",
        drivers: ["Lando Norris", "Oscar Piastri"],
        colors: &["orange", "blue"],
        championship_wins: 8,
        tier: PerformanceTier::Midfield,
    },
    Team {
        key: TeamKey::AstonMartin,
        name: "Aston Martin Aramco Cognizant F1 Team",
        short_name: "Aston Martin",
        engine: "Mercedes",
        principal: "Mike Krack",
        drivers: ["Fernando Alonso", "Lance Stroll"],
        colors: &["green"],
        championship_wins: 0,
        tier: PerformanceTier::Midfield,
    },
    Team {
        key: TeamKey::Alpine,
        name: "BWT Alpine F1 Team",
        short_name: "Alpine",
        engine: "Renault",
        principal: "Bruno Famin",
        drivers: ["Pierre Gasly", "Franco Colapinto"],
        colors: &["blue", "pink"],
        championship_wins: 2,
        tier: PerformanceTier::Midfield,
    },
    Team {
        key: TeamKey::Williams,
        name: "Williams Racing",
        short_name: "Williams",
        engine: "Mercedes",
        principal: "James Vowles",
        drivers: ["Alex Albon", "Carlos Sainz"],
        colors: &["blue", "white"],
        championship_wins: 9,
        tier: PerformanceTier::Midfield,
    },
    Team {
        key: TeamKey::RacingBulls,
        name: "Racing Bulls",
        short_name: "RB",
        engine: "Honda RBPT",
        principal: "Laurent Mekies",
        drivers: ["Yuki Tsunoda", "Isack Hadjar"],
        colors: &["white", "blue"],
        championship_wins: 0,
        tier: PerformanceTier::Backmarker,
    },
    Team {
        key: TeamKey::Haas,
        name: "MoneyGram Haas F1 Team",
        short_name: "Haas",
        engine: "Ferrari",
        principal: "Ayao Komatsu",
        drivers: ["Esteban Ocon", "Oliver Bearman"],
        colors: &["white", "red", "blue"],
        championship_wins: 0,
        tier: PerformanceTier::Backmarker,
    },
];

pub fn teams() -> &'static [Team] {
    &TEAMS
}

pub fn team(key: TeamKey) -> &'static Team {
    // Every TeamKey variant has exactly one row.
    TEAMS
        .iter()
        .find(|t| t.key == key)
        .unwrap_or(&TEAMS[3])
}

/// Teammate for `driver_name`: the other seat if they race on the grid,
/// otherwise the team's first listed driver.
pub fn teammate_for(driver_name: &str, team_key: TeamKey) -> String {
    let on_grid = TEAMS.iter().find(|t| t.drivers.contains(&driver_name));
    match on_grid {
        Some(t) => t
            .drivers
            .iter()
            .find(|d| **d != driver_name)
            .copied()
            .unwrap_or("Teammate")
            .to_string(),
        None => team(team_key).drivers[0].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_team() {
        for key in TeamKey::ALL {
            assert_eq!(team(key).key, key);
        }
    }

    #[test]
    fn teammate_of_a_grid_driver_is_the_other_seat() {
        assert_eq!(teammate_for("Lewis Hamilton", TeamKey::Mclaren), "Charles Leclerc");
    }

    #[test]
    fn fictional_driver_gets_first_team_driver() {
        assert_eq!(teammate_for("Alex Driver", TeamKey::Williams), "Alex Albon");
    }

    #[test]
    fn tiers_follow_the_grid_order() {
        assert_eq!(team(TeamKey::Ferrari).tier, PerformanceTier::TopTeam);
        assert_eq!(team(TeamKey::Alpine).tier, PerformanceTier::Midfield);
        assert_eq!(team(TeamKey::Haas).tier, PerformanceTier::Backmarker);
    }
}
