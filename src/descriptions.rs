//! Presentation data for each heart rate zone

use serde::Serialize;

use crate::zones::Zone;

/// Descriptive record shown next to a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneDescription {
    pub zone: Zone,
    pub name: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub examples: &'static [&'static str],
}

static ZONE_DESCRIPTIONS: [ZoneDescription; 6] = [
    ZoneDescription {
        zone: Zone::Recovery,
        name: "Recovery",
        description: "Close to your normal resting heart rate. No particular training effect.",
        benefits: &["Physical recovery", "Light cool-down"],
        examples: &["Everyday walking", "Light stretching"],
    },
    ZoneDescription {
        zone: Zone::Zone1,
        name: "Warm-up",
        description: "Very light intensity that can be sustained for a long time. \
                      Fat burning is at its most efficient here.",
        benefits: &[
            "More efficient fat burning",
            "Basic cardiorespiratory conditioning",
            "Faster recovery",
        ],
        examples: &["Brisk walking", "Easy jogging", "Easy cycling"],
    },
    ZoneDescription {
        zone: Zone::Zone2,
        name: "Aerobic Base",
        description: "Light to moderate intensity. Sustainable for long periods and \
                      the best zone for building endurance.",
        benefits: &[
            "Improved aerobic capacity",
            "Fat burning",
            "Better energy efficiency",
        ],
        examples: &["Jogging", "Cycling", "Long-distance swimming"],
    },
    ZoneDescription {
        zone: Zone::Zone3,
        name: "Aerobic Development",
        description: "Moderate to fairly high intensity. Raises endurance and \
                      aerobic capacity.",
        benefits: &[
            "Stronger heart and lungs",
            "Higher lactate threshold",
            "Fast-twitch fibre activation",
        ],
        examples: &["Tempo running", "Interval training"],
    },
    ZoneDescription {
        zone: Zone::Zone4,
        name: "Anaerobic Base",
        description: "High intensity that is hard to hold for long. Builds \
                      anaerobic capacity.",
        benefits: &[
            "More speed",
            "Better lactate tolerance",
            "Higher VO2 max",
        ],
        examples: &["Interval training", "Tempo running", "Race pace"],
    },
    ZoneDescription {
        zone: Zone::Zone5,
        name: "Maximum Effort",
        description: "Near maximal intensity, only sustainable for short bursts. \
                      Develops explosive power.",
        benefits: &[
            "Higher peak power",
            "Neuromuscular activation",
            "Sprint ability",
        ],
        examples: &["Short sprints", "High-intensity intervals", "Hill sprints"],
    },
];

/// Description for a single zone
pub fn zone_description(zone: Zone) -> &'static ZoneDescription {
    &ZONE_DESCRIPTIONS[zone.number() as usize]
}

/// Descriptions for zones 0 through 5, in order
pub fn zone_descriptions() -> &'static [ZoneDescription] {
    &ZONE_DESCRIPTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions_keyed_by_zone() {
        for zone in Zone::ALL {
            assert_eq!(zone_description(zone).zone, zone);
        }
        assert_eq!(zone_descriptions().len(), 6);
    }

    #[test]
    fn test_descriptions_are_populated() {
        for description in zone_descriptions() {
            assert!(!description.name.is_empty());
            assert!(!description.description.is_empty());
            assert!(!description.benefits.is_empty());
            assert!(!description.examples.is_empty());
        }
    }

    #[test]
    fn test_zone_names() {
        assert_eq!(zone_description(Zone::Recovery).name, "Recovery");
        assert_eq!(zone_description(Zone::Zone2).name, "Aerobic Base");
        assert_eq!(zone_description(Zone::Zone5).name, "Maximum Effort");
        assert_eq!(zone_description(Zone::Zone3).examples.len(), 2);
    }
}
