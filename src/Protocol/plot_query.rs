//! # Plot Query Module
//!
//! ## Aim
//! Temperature-swept rate plots. The server sweeps the range, evaluates the
//! rates and renders the figure; this module validates the range, picks the
//! requested image out of the reply, decodes it from base64 and puts it on
//! screen. Only one plot kind is visible at a time: showing reaction rates
//! clears the progress-rate plot and vice versa.
//!
//! ## Main Data Structures
//! - `PlotKind`: which of the two rate families is swept and drawn
//! - `parse_temperature_range`: bounds validation before dispatch
//! - `PlotImage`: decoded PNG bytes tagged with the session they belong to
//! - `PlotDisplay`: at most one visible image per kind, mutual exclusion

use super::kinetics_service_api::{PlotsWire, ServiceError};
use crate::Utils::show_plot::open_with_default_viewer;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// plot kind: reaction rates (per species) or progress rates (per reaction)
/// swept over the temperature range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    ReactionRates,
    ProgressRates,
}

impl PlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotKind::ReactionRates => "reaction",
            PlotKind::ProgressRates => "progress",
        }
    }

    /// key the server files this kind's image under in the plots reply
    pub fn reply_key(&self) -> &'static str {
        match self {
            PlotKind::ReactionRates => "reaction_rates",
            PlotKind::ProgressRates => "progress_rates",
        }
    }

    pub fn other(&self) -> PlotKind {
        match self {
            PlotKind::ReactionRates => PlotKind::ProgressRates,
            PlotKind::ProgressRates => PlotKind::ReactionRates,
        }
    }
}

/// both bounds must be numeric, the lower one non-negative and strictly below
/// the upper one; anything else is rejected before dispatch
pub fn parse_temperature_range(raw_low: &str, raw_high: &str) -> Result<(f64, f64), ServiceError> {
    let t_low = raw_low
        .trim()
        .parse::<f64>()
        .map_err(|_| ServiceError::InvalidRange)?;
    let t_high = raw_high
        .trim()
        .parse::<f64>()
        .map_err(|_| ServiceError::InvalidRange)?;
    if !t_low.is_finite() || !t_high.is_finite() || t_low < 0.0 || t_high <= t_low {
        return Err(ServiceError::InvalidRange);
    }
    Ok((t_low, t_high))
}

/// one decoded plot, tagged with the session it was rendered for
#[derive(Debug, Clone)]
pub struct PlotImage {
    pub session_id: String,
    pub kind: PlotKind,
    pub png: Vec<u8>,
}

impl PlotImage {
    /// Picks the payload matching the requested kind out of the reply and
    /// decodes it. A missing or undecodable payload is a malformed reply, not
    /// a validation error.
    pub fn decode(
        wire: PlotsWire,
        kind: PlotKind,
        session_id: &str,
    ) -> Result<Self, ServiceError> {
        let payload = match kind {
            PlotKind::ReactionRates => wire.reaction_rates,
            PlotKind::ProgressRates => wire.progress_rates,
        };
        let payload = payload.ok_or_else(|| {
            ServiceError::BadReply(format!("no {} rate image in plot reply", kind.as_str()))
        })?;
        let png = BASE64.decode(payload.trim()).map_err(|e| {
            ServiceError::BadReply(format!(
                "{} rate image is not valid base64: {}",
                kind.as_str(),
                e
            ))
        })?;
        Ok(Self {
            session_id: session_id.to_string(),
            kind,
            png,
        })
    }
}

/// Keeps at most one image file per plot kind and guarantees that showing one
/// kind removes the other kind's file, so the two plots never coexist.
#[derive(Debug)]
pub struct PlotDisplay {
    shown: [Option<PathBuf>; 2],
    out_dir: PathBuf,
    open_viewer: bool,
}

fn slot(kind: PlotKind) -> usize {
    match kind {
        PlotKind::ReactionRates => 0,
        PlotKind::ProgressRates => 1,
    }
}

impl PlotDisplay {
    pub fn new() -> Self {
        Self {
            shown: [None, None],
            out_dir: std::env::temp_dir(),
            open_viewer: true,
        }
    }

    /// writes into the given directory and never spawns a viewer process
    pub fn headless(out_dir: &Path) -> Self {
        Self {
            shown: [None, None],
            out_dir: out_dir.to_path_buf(),
            open_viewer: false,
        }
    }

    pub fn show(&mut self, image: &PlotImage) -> Result<PathBuf, std::io::Error> {
        let path = self
            .out_dir
            .join(format!("kinweb_{}_rates.png", image.kind.as_str()));
        fs::write(&path, &image.png)?;
        // only one plot kind stays visible at a time
        if let Some(old) = self.shown[slot(image.kind.other())].take() {
            let _ = fs::remove_file(old);
        }
        self.shown[slot(image.kind)] = Some(path.clone());
        info!(
            "{} rate plot written to {}",
            image.kind.as_str(),
            path.display()
        );
        if self.open_viewer {
            if let Err(e) = open_with_default_viewer(&path) {
                warn!("could not open image viewer: {}", e);
            }
        }
        Ok(path)
    }

    pub fn shown(&self, kind: PlotKind) -> Option<&Path> {
        self.shown[slot(kind)].as_deref()
    }

    pub fn clear(&mut self) {
        for entry in self.shown.iter_mut() {
            if let Some(path) = entry.take() {
                let _ = fs::remove_file(path);
            }
        }
    }
}
