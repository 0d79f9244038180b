//! Mobility profiles: penalty coefficients describing a traveller's needs

use serde::{Deserialize, Serialize};

use crate::Error;

/// Named set of multiplicative penalties and preference flags.
///
/// Immutable value object, selected before a run and handed to
/// [`crate::weighting::apply_profile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilityProfile {
    pub name: String,
    /// Applied to `wheelchair=no` ways; half of it to `wheelchair=limited`
    pub no_ramp_penalty: f64,
    pub stairs_penalty: f64,
    /// Applied when |incline| exceeds 5 %
    pub incline_penalty: f64,
    /// Applied when neither endpoint is a marked crossing
    pub no_crossing_penalty: f64,
    #[serde(default)]
    pub requires_accessibility: bool,
    #[serde(default)]
    pub prefers_marked_crossings: bool,
}

impl MobilityProfile {
    /// Profile with every penalty at 1.0 and no preferences
    pub fn neutral(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            no_ramp_penalty: 1.0,
            stairs_penalty: 1.0,
            incline_penalty: 1.0,
            no_crossing_penalty: 1.0,
            requires_accessibility: false,
            prefers_marked_crossings: false,
        }
    }

    pub fn standard() -> Self {
        Self::neutral("standard")
    }

    pub fn wheelchair() -> Self {
        Self {
            name: "wheelchair".to_string(),
            no_ramp_penalty: 10.0,
            stairs_penalty: 100.0,
            incline_penalty: 3.0,
            no_crossing_penalty: 1.5,
            requires_accessibility: true,
            prefers_marked_crossings: true,
        }
    }

    pub fn reduced_mobility() -> Self {
        Self {
            name: "reduced_mobility".to_string(),
            no_ramp_penalty: 3.0,
            stairs_penalty: 5.0,
            incline_penalty: 2.0,
            no_crossing_penalty: 1.2,
            requires_accessibility: true,
            prefers_marked_crossings: true,
        }
    }

    pub fn visually_impaired() -> Self {
        Self {
            name: "visually_impaired".to_string(),
            no_ramp_penalty: 1.0,
            stairs_penalty: 1.5,
            incline_penalty: 1.0,
            no_crossing_penalty: 3.0,
            requires_accessibility: false,
            prefers_marked_crossings: true,
        }
    }

    /// Rejects non-finite or negative coefficients, which would break the
    /// non-negative cost invariant
    pub fn validate(&self) -> Result<(), Error> {
        let coefficients = [
            ("no_ramp_penalty", self.no_ramp_penalty),
            ("stairs_penalty", self.stairs_penalty),
            ("incline_penalty", self.incline_penalty),
            ("no_crossing_penalty", self.no_crossing_penalty),
        ];

        for (field, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "profile '{}': {field} must be a finite non-negative number, got {value}",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Ordered collection of profiles addressable by name
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: Vec<MobilityProfile>,
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileCatalog {
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                MobilityProfile::standard(),
                MobilityProfile::wheelchair(),
                MobilityProfile::reduced_mobility(),
                MobilityProfile::visually_impaired(),
            ],
        }
    }

    /// Adds a profile, replacing an existing one with the same name
    pub fn insert(&mut self, profile: MobilityProfile) -> Result<(), Error> {
        profile.validate()?;
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&MobilityProfile, Error> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MobilityProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
