//! Named, persisted, shareable parameter presets.
//!
//! Presets live in the [`PresetLibrary`]; many phase slots may reference one
//! preset, and mutating it through the library is visible to every referencing
//! slot on its next load. On disk a preset is a small JSON document.

use serde::{Deserialize, Serialize};

use crate::error::AnimError;
use crate::ids::PresetId;
use crate::params::MotionParams;

/// A named parameter bundle, independent of any widget's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub params: MotionParams,
}

/// Asset store for presets. Insertion order is preserved for enumeration.
#[derive(Default, Debug)]
pub struct PresetLibrary {
    items: Vec<(PresetId, Preset)>,
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: PresetId, preset: Preset) {
        self.items.push((id, preset));
    }

    pub fn get(&self, id: PresetId) -> Option<&Preset> {
        self.items
            .iter()
            .find_map(|(p, d)| if *p == id { Some(d) } else { None })
    }

    pub(crate) fn get_mut(&mut self, id: PresetId) -> Option<&mut Preset> {
        self.items
            .iter_mut()
            .find_map(|(p, d)| if *p == id { Some(d) } else { None })
    }

    /// First preset with the given name, if any.
    pub fn find_by_name(&self, name: &str) -> Option<PresetId> {
        self.items
            .iter()
            .find_map(|(id, p)| if p.name == name { Some(*id) } else { None })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PresetId, Preset)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse a preset JSON document and validate its parameters.
pub fn parse_preset_json(s: &str) -> Result<Preset, AnimError> {
    let preset: Preset = serde_json::from_str(s)?;
    preset.params.validate_basic()?;
    Ok(preset)
}

/// Serialize a preset into its on-disk JSON form.
pub fn preset_to_json(preset: &Preset) -> Result<String, AnimError> {
    Ok(serde_json::to_string_pretty(preset)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MotionKind, Vec3};

    #[test]
    fn json_round_trip() {
        let preset = Preset {
            name: "pop".into(),
            params: MotionParams {
                kind: MotionKind::Scale,
                duration: 0.25,
                start_scale: Vec3::ZERO,
                end_scale: Vec3::ONE,
                ..MotionParams::default()
            },
        };
        let json = preset_to_json(&preset).unwrap();
        let back = parse_preset_json(&json).unwrap();
        assert_eq!(preset, back);
    }

    #[test]
    fn parse_applies_field_defaults() {
        let preset = parse_preset_json(
            r#"{"name":"terse","params":{"kind":"Fade","duration":0.5,"end_alpha":1.0}}"#,
        )
        .unwrap();
        assert_eq!(preset.params.kind, MotionKind::Fade);
        assert_eq!(preset.params.delay, 0.0);
        assert_eq!(preset.params.end_alpha, 1.0);
    }

    #[test]
    fn parse_rejects_bad_timing() {
        let err = parse_preset_json(
            r#"{"name":"bad","params":{"kind":"Fade","duration":-1.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimError::InvalidParams { .. }));
    }
}
