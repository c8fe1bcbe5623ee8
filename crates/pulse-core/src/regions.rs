//! The registry of region kinds a status page carries.
//!
//! Adding a region means adding a variant here with its target and renderer;
//! the synchronizer itself never changes.

use pulse_blocks::{Target, Update, vocabulary};
use pulse_scan::{HygieneReport, RankedFile, ScanSummary};

use crate::config::RegionToggles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Badge,
    Mission,
    Diagnostics,
    SanitizeLog,
    MutationRisk,
}

impl RegionKind {
    /// Every kind, in synchronization order.
    pub const ALL: [RegionKind; 5] = [
        RegionKind::Badge,
        RegionKind::Mission,
        RegionKind::Diagnostics,
        RegionKind::SanitizeLog,
        RegionKind::MutationRisk,
    ];

    pub fn target(self) -> Target {
        match self {
            RegionKind::Badge => Target::Element(vocabulary::BADGE.clone()),
            RegionKind::Mission => Target::Region(vocabulary::MISSION.clone()),
            RegionKind::Diagnostics => Target::Region(vocabulary::DIAGNOSTICS.clone()),
            RegionKind::SanitizeLog => Target::Region(vocabulary::SANITIZE_LOG.clone()),
            RegionKind::MutationRisk => Target::Region(vocabulary::MUTATION_RISK.clone()),
        }
    }

    pub fn enabled(self, toggles: &RegionToggles) -> bool {
        match self {
            RegionKind::Badge => toggles.badge,
            RegionKind::Mission => toggles.mission,
            RegionKind::Diagnostics => toggles.diagnostics,
            RegionKind::SanitizeLog => toggles.sanitize_log,
            RegionKind::MutationRisk => toggles.mutation_risk,
        }
    }

    /// Render this kind's payload, or `None` when its input was not produced.
    fn render(self, inputs: &RenderInputs<'_>) -> Option<String> {
        let ts = inputs.timestamp;
        match self {
            RegionKind::Badge => Some(pulse_render::badge(ts)),
            RegionKind::Mission => Some(pulse_render::mission_payload(ts, inputs.mission)),
            RegionKind::Diagnostics => Some(pulse_render::diagnostics_payload(
                ts,
                inputs.summary,
                inputs.reflection,
            )),
            RegionKind::SanitizeLog => inputs
                .hygiene
                .map(|report| pulse_render::sanitize_payload(ts, report, inputs.hygiene_applied)),
            RegionKind::MutationRisk => inputs
                .ranked
                .map(|ranked| pulse_render::mutation_risk_payload(ts, ranked)),
        }
    }
}

/// Everything the renderers draw from.
#[derive(Debug, Clone)]
pub struct RenderInputs<'a> {
    pub timestamp: &'a str,
    pub mission: &'a str,
    pub summary: &'a ScanSummary,
    pub reflection: &'a str,
    pub hygiene: Option<&'a HygieneReport>,
    pub hygiene_applied: bool,
    /// `None` when risk scoring is off.
    pub ranked: Option<&'a [RankedFile]>,
}

/// Targets of the enabled regions, in synchronization order.
pub fn enabled_targets(toggles: &RegionToggles) -> Vec<Target> {
    RegionKind::ALL
        .into_iter()
        .filter(|kind| kind.enabled(toggles))
        .map(RegionKind::target)
        .collect()
}

/// The ordered update list for one run.
pub fn build_updates(toggles: &RegionToggles, inputs: &RenderInputs<'_>) -> Vec<Update> {
    RegionKind::ALL
        .into_iter()
        .filter(|kind| kind.enabled(toggles))
        .filter_map(|kind| {
            let payload = kind.render(inputs)?;
            Some(match kind.target() {
                Target::Region(marker) => Update::region(marker, payload),
                Target::Element(element) => Update::element(element, payload),
            })
        })
        .collect()
}
