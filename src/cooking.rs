use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SteakError;

pub const MIN_THICKNESS_MM: u32 = 10;
pub const MAX_THICKNESS_MM: u32 = 60;
pub const DEFAULT_THICKNESS_MM: u32 = 25;

/// Thickness the base cooking times are calibrated for (roughly one inch)
const BASE_THICKNESS_MM: f64 = 25.0;
const REST_SECS: u32 = 300;
const MM_PER_INCH: f64 = 25.4;

pub const STEP_COUNT: usize = 3;

/// Target internal cook level, ordered from least to most cooked
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Doneness {
    Blue,
    Rare,
    #[strum(to_string = "Medium Rare")]
    MediumRare,
    Medium,
    #[strum(to_string = "Medium Well")]
    MediumWell,
    #[strum(to_string = "Well Done")]
    WellDone,
}

impl Doneness {
    pub const ALL: [Doneness; 6] = [
        Doneness::Blue,
        Doneness::Rare,
        Doneness::MediumRare,
        Doneness::Medium,
        Doneness::MediumWell,
        Doneness::WellDone,
    ];

    /// Seconds of active searing for a steak of the base thickness
    pub fn base_secs(self) -> u32 {
        match self {
            Doneness::Blue => 120,
            Doneness::Rare => 210,
            Doneness::MediumRare => 330,
            Doneness::Medium => 450,
            Doneness::MediumWell => 570,
            Doneness::WellDone => 690,
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Next level towards well done, wrapping around to blue
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for Doneness {
    fn default() -> Self {
        Doneness::MediumRare
    }
}

impl FromStr for Doneness {
    type Err = SteakError;

    /// Accepts the display labels as well as kebab/snake spellings, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|d| {
                let label: String = d
                    .to_string()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .collect();
                label == wanted
            })
            .ok_or_else(|| SteakError::UnknownDoneness(s.to_string()))
    }
}

/// One named phase of a cook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookingStep {
    pub name: &'static str,
    pub duration: u32,
    pub description: &'static str,
}

/// Sear both sides then rest. Durations scale linearly with thickness
/// from the per-doneness base; the rest is fixed.
pub fn compute_steps(thickness_mm: f64, doneness: Doneness) -> [CookingStep; STEP_COUNT] {
    debug_assert!(thickness_mm > 0.0, "thickness must be positive");

    let scale_factor = thickness_mm / BASE_THICKNESS_MM;
    let total_cooking = (f64::from(doneness.base_secs()) * scale_factor).round();
    let side = (total_cooking / 2.0).round() as u32;

    [
        CookingStep {
            name: "Sear Side 1",
            duration: side,
            description: "Place the steak on the hot pan. Don't touch it!",
        },
        CookingStep {
            name: "Flip & Sear Side 2",
            duration: side,
            description: "Flip the steak. Cook until the timer ends.",
        },
        CookingStep {
            name: "Rest",
            duration: REST_SECS,
            description: "Remove from pan. Let it rest on a warm plate or board.",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteakId(pub u64);

/// A configured steak; immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteakConfig {
    pub id: SteakId,
    pub thickness_mm: u32,
    pub doneness: Doneness,
    pub steps: [CookingStep; STEP_COUNT],
}

impl SteakConfig {
    pub fn new(id: SteakId, thickness_mm: u32, doneness: Doneness) -> Result<Self, SteakError> {
        if thickness_mm == 0 {
            return Err(SteakError::InvalidThickness(thickness_mm));
        }

        Ok(Self {
            id,
            thickness_mm,
            doneness,
            steps: compute_steps(f64::from(thickness_mm), doneness),
        })
    }

    /// Seconds from first sear to the end of the rest
    pub fn total_duration(&self) -> u32 {
        crate::sync::total_duration(&self.steps)
    }
}

/// Inches with one decimal place, e.g. "1.0"
pub fn mm_to_inch(mm: u32) -> String {
    format!("{:.1}", f64::from(mm) / MM_PER_INCH)
}

pub fn inch_to_mm(inch: f64) -> u32 {
    (inch * MM_PER_INCH).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn active_secs(steps: &[CookingStep; STEP_COUNT]) -> u32 {
        steps[0].duration + steps[1].duration
    }

    #[test]
    fn test_base_thickness_matches_base_times() {
        for doneness in Doneness::ALL {
            let steps = compute_steps(25.0, doneness);
            assert_eq!(active_secs(&steps), doneness.base_secs(), "{doneness}");
            assert_eq!(steps[2].duration, 300);
        }
    }

    #[test]
    fn test_medium_rare_one_inch() {
        let steps = compute_steps(25.0, Doneness::MediumRare);
        let durations: Vec<u32> = steps.iter().map(|s| s.duration).collect();
        assert_eq!(durations, vec![165, 165, 300]);
        assert_eq!(steps[0].name, "Sear Side 1");
        assert_eq!(steps[1].name, "Flip & Sear Side 2");
        assert_eq!(steps[2].name, "Rest");
    }

    #[test]
    fn test_sides_are_half_of_rounded_total() {
        for doneness in Doneness::ALL {
            for mm in 1..=120u32 {
                let steps = compute_steps(f64::from(mm), doneness);
                let total = (f64::from(doneness.base_secs()) * (f64::from(mm) / 25.0)).round();
                assert_eq!(steps[0].duration, (total / 2.0).round() as u32);
                assert_eq!(steps[0].duration, steps[1].duration);
            }
        }
    }

    #[test]
    fn test_thicker_never_cooks_shorter() {
        for doneness in Doneness::ALL {
            let mut previous = 0;
            for mm in MIN_THICKNESS_MM..=MAX_THICKNESS_MM {
                let active = active_secs(&compute_steps(f64::from(mm), doneness));
                assert!(active >= previous, "{doneness} at {mm}mm");
                previous = active;
            }
        }
    }

    #[test]
    fn test_thin_blue_steak() {
        // 120 * 10/25 = 48 -> 24 per side
        let steps = compute_steps(10.0, Doneness::Blue);
        assert_eq!(steps[0].duration, 24);
        assert_eq!(steps[1].duration, 24);
    }

    #[test]
    fn test_fractional_thickness_is_accepted() {
        let steps = compute_steps(12.5, Doneness::Medium);
        assert_eq!(steps[0].duration, 113); // 225 -> 112.5 -> 113
    }

    #[test]
    fn test_compute_steps_is_deterministic() {
        assert_eq!(
            compute_steps(37.0, Doneness::WellDone),
            compute_steps(37.0, Doneness::WellDone)
        );
    }

    #[test]
    fn test_doneness_display() {
        assert_eq!(Doneness::Blue.to_string(), "Blue");
        assert_eq!(Doneness::MediumRare.to_string(), "Medium Rare");
        assert_eq!(Doneness::MediumWell.to_string(), "Medium Well");
        assert_eq!(Doneness::WellDone.to_string(), "Well Done");
    }

    #[test]
    fn test_doneness_from_str() {
        assert_eq!("Medium Rare".parse::<Doneness>().unwrap(), Doneness::MediumRare);
        assert_eq!("medium-well".parse::<Doneness>().unwrap(), Doneness::MediumWell);
        assert_eq!("WELL_DONE".parse::<Doneness>().unwrap(), Doneness::WellDone);
        assert_matches!(
            "charred".parse::<Doneness>(),
            Err(SteakError::UnknownDoneness(s)) if s == "charred"
        );
    }

    #[test]
    fn test_doneness_ordering_and_cycling() {
        assert!(Doneness::Blue < Doneness::Rare);
        assert!(Doneness::MediumWell < Doneness::WellDone);
        assert_eq!(Doneness::Medium.next(), Doneness::MediumWell);
        assert_eq!(Doneness::WellDone.next(), Doneness::Blue);
        assert_eq!(Doneness::Blue.prev(), Doneness::WellDone);
        assert_eq!(Doneness::default(), Doneness::MediumRare);
    }

    #[test]
    fn test_steak_config_rejects_zero_thickness() {
        assert_matches!(
            SteakConfig::new(SteakId(1), 0, Doneness::Rare),
            Err(SteakError::InvalidThickness(0))
        );
    }

    #[test]
    fn test_steak_config_total_duration() {
        let steak = SteakConfig::new(SteakId(7), 25, Doneness::MediumRare).unwrap();
        assert_eq!(steak.id, SteakId(7));
        assert_eq!(steak.total_duration(), 630);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(mm_to_inch(25), "1.0");
        assert_eq!(mm_to_inch(50), "2.0");
        assert_eq!(mm_to_inch(10), "0.4");
        assert_eq!(inch_to_mm(1.0), 25);
        assert_eq!(inch_to_mm(1.5), 38);
    }
}
