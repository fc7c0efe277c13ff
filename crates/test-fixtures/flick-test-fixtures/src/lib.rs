//! Shared test support: the preset JSON corpus under `fixtures/` plus a
//! scripted tween backend for deterministic state-machine tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use flick_animation_core::{TweenBackend, TweenId, TweenSpec, WidgetId};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    presets: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

pub mod presets {
    use super::*;
    use flick_animation_core::{parse_preset_json, Preset};

    pub fn keys() -> Vec<String> {
        MANIFEST.presets.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = MANIFEST
            .presets
            .get(name)
            .ok_or_else(|| anyhow!("unknown preset fixture '{name}'"))?;
        read_to_string(rel)
    }

    pub fn load(name: &str) -> Result<Preset> {
        let text = json(name)?;
        parse_preset_json(&text).map_err(|e| anyhow!("failed to parse preset '{name}': {e}"))
    }
}

/// One submitted tween, kept for assertions even after cancellation.
#[derive(Clone, Debug)]
pub struct TweenRecord {
    pub widget: WidgetId,
    pub tween: TweenId,
    pub spec: TweenSpec,
}

/// Backend test double. Records every submission, tracks which tweens are
/// live, and completes them only when the test says so — cancelled tweens can
/// never surface as completed.
#[derive(Default, Debug)]
pub struct RecordingTweens {
    pub submitted: Vec<TweenRecord>,
    pub cancels: Vec<WidgetId>,
    live: Vec<(WidgetId, TweenId)>,
    completed: Vec<TweenId>,
}

impl RecordingTweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_for(&self, widget: WidgetId) -> Vec<TweenId> {
        self.live
            .iter()
            .filter(|(w, _)| *w == widget)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn last_submitted(&self) -> Option<&TweenRecord> {
        self.submitted.last()
    }

    pub fn specs_for(&self, widget: WidgetId) -> Vec<&TweenSpec> {
        self.submitted
            .iter()
            .filter(|r| r.widget == widget)
            .map(|r| &r.spec)
            .collect()
    }

    /// Mark a live tween finished; it surfaces on the next drain.
    pub fn finish(&mut self, tween: TweenId) {
        if let Some(pos) = self.live.iter().position(|(_, t)| *t == tween) {
            self.live.remove(pos);
            self.completed.push(tween);
        }
    }

    /// Finish every live tween, in submission order.
    pub fn finish_all(&mut self) {
        let drained: Vec<TweenId> = self.live.drain(..).map(|(_, t)| t).collect();
        self.completed.extend(drained);
    }
}

impl TweenBackend for RecordingTweens {
    fn submit(&mut self, widget: WidgetId, tween: TweenId, spec: TweenSpec) {
        self.submitted.push(TweenRecord {
            widget,
            tween,
            spec,
        });
        self.live.push((widget, tween));
    }

    fn cancel_all(&mut self, widget: WidgetId) {
        self.cancels.push(widget);
        self.live.retain(|(w, _)| *w != widget);
    }

    fn drain_completed(&mut self, out: &mut Vec<TweenId>) {
        out.append(&mut self.completed);
    }
}
