use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::ZoneError;

/// Fractions of max heart rate bounding zones 1-5:
/// - Z1: 50-60% (Warm-up)
/// - Z2: 60-70% (Aerobic base)
/// - Z3: 70-80% (Aerobic development)
/// - Z4: 80-90% (Anaerobic base)
/// - Z5: 90-100% (Maximum effort)
///
/// Boundaries are IEEE double products, so `165 * 0.7` is 115.49999999999999
/// and rounds down.
const ZONE_FRACTIONS: [(f64, f64); 5] = [
    (0.5, 0.6),
    (0.6, 0.7),
    (0.7, 0.8),
    (0.8, 0.9),
    (0.9, 1.0),
];

/// Heart rate intensity zone.
///
/// `Recovery` (zone 0) is everything below 50% of max heart rate; zones 1-5
/// are the trainable bands. Serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Zone {
    Recovery = 0,
    Zone1 = 1,
    Zone2 = 2,
    Zone3 = 3,
    Zone4 = 4,
    Zone5 = 5,
}

impl Zone {
    /// All six zones, 0 through 5
    pub const ALL: [Zone; 6] = [
        Zone::Recovery,
        Zone::Zone1,
        Zone::Zone2,
        Zone::Zone3,
        Zone::Zone4,
        Zone::Zone5,
    ];

    /// The five trainable zones, 1 through 5
    pub const TRAINING: [Zone; 5] = [Zone::Zone1, Zone::Zone2, Zone::Zone3, Zone::Zone4, Zone::Zone5];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Lower and upper fraction of max heart rate, `None` for zone 0
    pub fn fractions(self) -> Option<(f64, f64)> {
        self.training_index().map(|index| ZONE_FRACTIONS[index])
    }

    /// Index into a zone 1-5 array, `None` for zone 0
    pub(crate) fn training_index(self) -> Option<usize> {
        match self {
            Zone::Recovery => None,
            zone => Some(zone.number() as usize - 1),
        }
    }
}

impl TryFrom<u8> for Zone {
    type Error = ZoneError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Zone::ALL
            .get(value as usize)
            .copied()
            .ok_or(ZoneError::InvalidZoneNumber(value))
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> Self {
        zone.number()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone {}", self.number())
    }
}

/// Heart rate boundaries of one zone in bpm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRange {
    pub min: u16,
    pub max: u16,
}

impl ZoneRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }
}

impl From<ZoneRange> for (u16, u16) {
    fn from(range: ZoneRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for ZoneRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} bpm", self.min, self.max)
    }
}

/// Ranges of the five training zones, as stored on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZones {
    pub zone1: ZoneRange,
    pub zone2: ZoneRange,
    pub zone3: ZoneRange,
    pub zone4: ZoneRange,
    pub zone5: ZoneRange,
}

impl HeartRateZones {
    /// Range for a training zone, `None` for zone 0
    pub fn get(&self, zone: Zone) -> Option<ZoneRange> {
        match zone {
            Zone::Recovery => None,
            Zone::Zone1 => Some(self.zone1),
            Zone::Zone2 => Some(self.zone2),
            Zone::Zone3 => Some(self.zone3),
            Zone::Zone4 => Some(self.zone4),
            Zone::Zone5 => Some(self.zone5),
        }
    }

    /// Zones in order 1 through 5
    pub fn iter(&self) -> impl Iterator<Item = (Zone, ZoneRange)> + '_ {
        [self.zone1, self.zone2, self.zone3, self.zone4, self.zone5]
            .into_iter()
            .zip(Zone::TRAINING)
            .map(|(range, zone)| (zone, range))
    }
}

/// Estimate max heart rate from age: `round(211 - 0.64 * age)`
///
/// Rounds half away from zero. Any `u8` age yields a value in 48..=211, so
/// there is no failure mode; callers validate realistic ages upstream.
pub fn estimate_max_heart_rate(age: u8) -> u16 {
    let max_hr = round_bpm(211.0 - 0.64 * f64::from(age));
    debug!(age, max_hr, "Estimated max heart rate");
    max_hr
}

/// Boundaries of `zone` for the given max heart rate.
///
/// Each boundary is rounded on its own from its fraction of max heart rate;
/// nothing is derived from the neighbouring zone. Zone 0 has no range.
pub fn zone_range(max_heart_rate: u16, zone: Zone) -> Result<ZoneRange, ZoneError> {
    let (lower, upper) = zone
        .fractions()
        .ok_or(ZoneError::NoRangeForZone(zone.number()))?;

    Ok(range_from_fractions(max_heart_rate, lower, upper))
}

/// Ranges of zones 1-5 for the given max heart rate
pub fn all_zone_ranges(max_heart_rate: u16) -> HeartRateZones {
    let [zone1, zone2, zone3, zone4, zone5] =
        ZONE_FRACTIONS.map(|(lower, upper)| range_from_fractions(max_heart_rate, lower, upper));

    let zones = HeartRateZones {
        zone1,
        zone2,
        zone3,
        zone4,
        zone5,
    };
    debug!(max_heart_rate, ?zones, "Calculated heart rate zones");
    zones
}

/// Zone an observed heart rate falls into.
///
/// Compares the exact ratio `heart_rate / max_heart_rate` against half-open
/// thresholds at 0.5, 0.6, 0.7, 0.8 and 0.9. Anything at or above 90%,
/// including readings above max heart rate, is zone 5.
pub fn classify_zone(heart_rate: f64, max_heart_rate: f64) -> Result<Zone, ZoneError> {
    if !max_heart_rate.is_finite() || max_heart_rate <= 0.0 {
        return Err(ZoneError::InvalidMaxHeartRate { value: max_heart_rate });
    }
    if heart_rate.is_nan() {
        return Err(ZoneError::InvalidHeartRate { value: heart_rate });
    }

    let percent = heart_rate / max_heart_rate;

    let zone = if percent < 0.5 {
        Zone::Recovery
    } else if percent < 0.6 {
        Zone::Zone1
    } else if percent < 0.7 {
        Zone::Zone2
    } else if percent < 0.8 {
        Zone::Zone3
    } else if percent < 0.9 {
        Zone::Zone4
    } else {
        Zone::Zone5
    };

    Ok(zone)
}

fn range_from_fractions(max_heart_rate: u16, lower: f64, upper: f64) -> ZoneRange {
    let max_hr = f64::from(max_heart_rate);
    ZoneRange {
        min: round_bpm(max_hr * lower),
        max: round_bpm(max_hr * upper),
    }
}

/// Round half away from zero to whole bpm.
///
/// Inputs are products of a `u16` with a fraction <= 1 or the age formula,
/// both of which stay inside `u16`.
fn round_bpm(value: f64) -> u16 {
    value.round() as u16
}

/// Zone tagging for heart rate sample series
pub struct ZoneAnalyzer;

impl ZoneAnalyzer {
    /// Zone of each sample, in input order
    pub fn tag(samples: &[u16], max_heart_rate: u16) -> Result<Vec<Zone>, ZoneError> {
        let max_hr = f64::from(max_heart_rate);
        samples
            .iter()
            .map(|&hr| classify_zone(f64::from(hr), max_hr))
            .collect()
    }

    /// Count samples per zone and derive each zone's share
    pub fn analyze(samples: &[u16], max_heart_rate: u16) -> Result<ZoneSampleDistribution, ZoneError> {
        let mut counts = [0u32; 6];
        for zone in Self::tag(samples, max_heart_rate)? {
            counts[zone.number() as usize] += 1;
        }

        Ok(ZoneSampleDistribution {
            counts,
            total_points: samples.len() as u32,
        })
    }
}

/// Per-zone sample counts for zones 0-5
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSampleDistribution {
    counts: [u32; 6],
    pub total_points: u32,
}

impl ZoneSampleDistribution {
    pub fn count(&self, zone: Zone) -> u32 {
        self.counts[zone.number() as usize]
    }

    /// Share of samples in `zone` as a percentage, zero for an empty series
    pub fn percent(&self, zone: Zone) -> Decimal {
        if self.total_points == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(self.count(zone)) / Decimal::from(self.total_points) * dec!(100)
        }
    }
}
