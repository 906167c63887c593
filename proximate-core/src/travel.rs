//! Rough travel-time estimates derived from great-circle distance.
//!
//! Estimates divide the straight-line distance by a fixed average speed per
//! mode. They ignore road networks and flight paths and exist to give a
//! distance figure some human scale.

use std::time::Duration;

use crate::GeoError;

/// Means of travel with an associated average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Travelling by car.
    Driving,
    /// Travelling by scheduled flight.
    Flying,
    /// Travelling on foot.
    Walking,
}

/// Average speeds in kilometres per hour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TravelSpeeds {
    driving_kmh: f64,
    flying_kmh: f64,
    walking_kmh: f64,
}

impl Default for TravelSpeeds {
    fn default() -> Self {
        Self {
            driving_kmh: 80.0,
            flying_kmh: 800.0,
            walking_kmh: 5.0,
        }
    }
}

impl TravelSpeeds {
    /// Validate and construct a speed table.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidConfiguration`] when any speed is not a
    /// positive finite number.
    pub fn new(driving_kmh: f64, flying_kmh: f64, walking_kmh: f64) -> Result<Self, GeoError> {
        for (name, speed) in [
            ("driving_kmh", driving_kmh),
            ("flying_kmh", flying_kmh),
            ("walking_kmh", walking_kmh),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(GeoError::InvalidConfiguration {
                    name,
                    reason: "speed must be a positive finite number",
                });
            }
        }
        Ok(Self {
            driving_kmh,
            flying_kmh,
            walking_kmh,
        })
    }

    /// Average speed for `mode` in km/h.
    #[must_use]
    pub const fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Driving => self.driving_kmh,
            TravelMode::Flying => self.flying_kmh,
            TravelMode::Walking => self.walking_kmh,
        }
    }

    /// Estimate travel times for every mode over `distance_km`.
    ///
    /// Negative or non-finite distances are treated as zero.
    #[must_use]
    pub fn estimate(&self, distance_km: f64) -> TravelEstimates {
        let km = if distance_km.is_finite() {
            distance_km.max(0.0)
        } else {
            0.0
        };
        TravelEstimates {
            driving: self.estimate_mode(TravelMode::Driving, km),
            flying: self.estimate_mode(TravelMode::Flying, km),
            walking: self.estimate_mode(TravelMode::Walking, km),
        }
    }

    fn estimate_mode(&self, mode: TravelMode, distance_km: f64) -> TravelEstimate {
        let hours = distance_km / self.speed_kmh(mode);
        let duration = Duration::try_from_secs_f64(hours * 3600.0).unwrap_or(Duration::MAX);
        TravelEstimate {
            mode,
            hours,
            duration,
        }
    }
}

/// Travel time for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TravelEstimate {
    /// Mode this estimate applies to.
    pub mode: TravelMode,
    /// Fractional hours.
    pub hours: f64,
    /// The same estimate as a [`Duration`].
    #[cfg_attr(feature = "serde", serde(skip))]
    pub duration: Duration,
}

/// Travel times for every supported mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TravelEstimates {
    /// Driving estimate.
    pub driving: TravelEstimate,
    /// Flying estimate.
    pub flying: TravelEstimate,
    /// Walking estimate.
    pub walking: TravelEstimate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TravelMode::Driving, 10.0)]
    #[case(TravelMode::Flying, 1.0)]
    #[case(TravelMode::Walking, 160.0)]
    fn default_speeds_match_average_modes(#[case] mode: TravelMode, #[case] hours: f64) {
        let estimates = TravelSpeeds::default().estimate(800.0);
        let estimate = match mode {
            TravelMode::Driving => estimates.driving,
            TravelMode::Flying => estimates.flying,
            TravelMode::Walking => estimates.walking,
        };
        assert_eq!(estimate.mode, mode);
        assert!((estimate.hours - hours).abs() < 1e-9);
    }

    #[rstest]
    fn duration_tracks_hours() {
        let estimates = TravelSpeeds::default().estimate(120.0);
        assert_eq!(estimates.driving.duration, Duration::from_secs(5400));
    }

    #[rstest]
    fn bad_distance_estimates_zero() {
        let estimates = TravelSpeeds::default().estimate(f64::NAN);
        assert_eq!(estimates.walking.duration, Duration::ZERO);
    }

    #[rstest]
    #[case(0.0, 800.0, 5.0)]
    #[case(80.0, f64::INFINITY, 5.0)]
    #[case(80.0, 800.0, -5.0)]
    fn rejects_non_positive_speeds(#[case] driving: f64, #[case] flying: f64, #[case] walking: f64) {
        let err = TravelSpeeds::new(driving, flying, walking).expect_err("speed rejected");
        assert!(matches!(err, GeoError::InvalidConfiguration { .. }));
    }
}
