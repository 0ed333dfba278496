use std::{collections::HashSet, ops::RangeInclusive};

use crate::{
    info,
    types::{AudioFeature, Track},
    utils::{artists_intersect, describe_track},
    warning,
};

/// Tempo detection sometimes reports a quarter of the real cadence.
pub const QUARTER_TIME_BAND: RangeInclusive<f64> = 44.5..=45.5;
pub const CADENCE_BAND: RangeInclusive<f64> = 178.0..=182.0;
pub const HALF_TIME_BAND: RangeInclusive<f64> = 89.0..=91.0;

pub const LIVENESS_CEILING: f64 = 0.8;
pub const ENERGY_FLOOR: f64 = 0.3;
pub const VALENCE_FLOOR: f64 = 0.3;

/// Decides from audio features whether a track fits a running cadence.
#[derive(Debug, Clone, Default)]
pub struct SuitabilityClassifier {
    live_allowlist: HashSet<String>,
}

impl SuitabilityClassifier {
    /// `live_allowlist` holds the artists whose live recordings are allowed.
    pub fn new<I, S>(live_allowlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            live_allowlist: live_allowlist.into_iter().map(Into::into).collect(),
        }
    }

    /// A track without feature data is never suitable.
    pub fn is_suitable(&self, track: &Track, feature: Option<&AudioFeature>) -> bool {
        let Some(feature) = feature else {
            warning!("No analysis found for {}", describe_track(track));
            return false;
        };

        if feature.liveness > LIVENESS_CEILING && !artists_intersect(track, &self.live_allowlist) {
            return false;
        }
        if feature.energy < ENERGY_FLOOR || feature.valence < VALENCE_FLOOR {
            return false;
        }

        let tempo = feature.tempo;
        if QUARTER_TIME_BAND.contains(&tempo) {
            info!("45 BPM track: {}", describe_track(track));
            return true;
        }
        CADENCE_BAND.contains(&tempo) || HALF_TIME_BAND.contains(&tempo)
    }
}
