//! Krumhansl-Schmuckler key profiles
//!
//! Reference pitch-class weightings characteristic of major and minor
//! keys, used via correlation for key estimation.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). Cognitive Foundations of Musical Pitch.
//! Oxford University Press.

/// Krumhansl-Schmuckler major profile (tonic at index 0, unnormalized).
const MAJOR_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Krumhansl-Schmuckler minor profile (tonic at index 0, unnormalized).
const MINOR_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Key profiles for both modes, each normalized to sum to 1.
#[derive(Debug, Clone)]
pub struct KeyProfiles {
    /// Normalized major profile, tonic at index 0
    pub major: [f32; 12],

    /// Normalized minor profile, tonic at index 0
    pub minor: [f32; 12],
}

impl KeyProfiles {
    /// Build normalized profiles from the literal Krumhansl values.
    pub fn new() -> Self {
        Self {
            major: normalize(MAJOR_PROFILE),
            minor: normalize(MINOR_PROFILE),
        }
    }

    /// Rotate a profile so its tonic sits at `root`.
    pub fn rotated(profile: &[f32; 12], root: u8) -> [f32; 12] {
        let mut rotated = [0.0; 12];
        for (i, &value) in profile.iter().enumerate() {
            rotated[(i + root as usize) % 12] = value;
        }
        rotated
    }
}

impl Default for KeyProfiles {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(mut profile: [f32; 12]) -> [f32; 12] {
    let total: f32 = profile.iter().sum();
    for value in profile.iter_mut() {
        *value /= total;
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_sum_to_one() {
        let profiles = KeyProfiles::new();
        let major_sum: f32 = profiles.major.iter().sum();
        let minor_sum: f32 = profiles.minor.iter().sum();
        assert!((major_sum - 1.0).abs() < 1e-5);
        assert!((minor_sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_tonic_dominates() {
        let profiles = KeyProfiles::new();
        for i in 1..12 {
            assert!(profiles.major[0] > profiles.major[i]);
            assert!(profiles.minor[0] > profiles.minor[i]);
        }
    }

    #[test]
    fn test_rotation_moves_tonic() {
        let profiles = KeyProfiles::new();
        let g_major = KeyProfiles::rotated(&profiles.major, 7);
        assert!((g_major[7] - profiles.major[0]).abs() < 1e-6);
        assert!((g_major[0] - profiles.major[5]).abs() < 1e-6);
        assert!((g_major[6] - profiles.major[11]).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_by_zero_is_identity() {
        let profiles = KeyProfiles::new();
        assert_eq!(KeyProfiles::rotated(&profiles.major, 0), profiles.major);
    }
}
