//! In-memory board snapshot
//!
//! [`BoardSnapshot`] is a serde-loadable implementation of [`BoardSource`]
//! for hosts that hand over a design as JSON instead of a live CAD session,
//! and for tests. It carries title block, properties, layer set, and placed
//! parts, but no geometry: rendered artifacts contain only format headers.
//! Hosts with real geometry implement [`BoardSource`] against their CAD
//! engine instead.

use super::source::{BoardSource, DrillOptions, Layer, LayerPlanStep, PlacedPart, PlotOptions};
use crate::domain::{PushError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// A complete, self-contained description of a board design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Path of the design's backing file. Does not have to exist on disk;
    /// only its directory and stem are used.
    pub file_path: PathBuf,

    /// Title-block title, may be empty
    #[serde(default)]
    pub title: String,

    /// Title-block comment lines
    #[serde(default)]
    pub comments: Vec<String>,

    /// Free-form design properties
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// Auxiliary origin in design units (nanometers)
    #[serde(default)]
    pub aux_origin: (i64, i64),

    /// Solder-mask margin in design units
    #[serde(default)]
    pub solder_mask_margin: i64,

    /// Solder-mask minimum width in design units
    #[serde(default)]
    pub solder_mask_min_width: i64,

    /// The set of enabled layers
    #[serde(default)]
    pub enabled_layers: BTreeSet<Layer>,

    /// Placed parts in design order
    #[serde(default)]
    pub parts: Vec<PlacedPart>,
}

impl BoardSnapshot {
    /// Creates an empty snapshot for the given backing file path
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            title: String::new(),
            comments: Vec::new(),
            properties: BTreeMap::new(),
            aux_origin: (0, 0),
            solder_mask_margin: 0,
            solder_mask_min_width: 0,
            enabled_layers: BTreeSet::new(),
            parts: Vec::new(),
        }
    }

    /// Loads a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PushError::Board(format!("Failed to read board snapshot {}: {e}", path.display()))
        })?;
        let snapshot: Self = serde_json::from_str(&contents).map_err(|e| {
            PushError::Board(format!(
                "Failed to parse board snapshot {}: {e}",
                path.display()
            ))
        })?;
        Ok(snapshot)
    }

    /// Writes the snapshot back to a JSON file
    ///
    /// Used to persist title-block changes, e.g. a freshly assigned
    /// project link.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|e| {
            PushError::Board(format!(
                "Failed to write board snapshot {}: {e}",
                path.display()
            ))
        })
    }

    /// File stem of the backing file, used in artifact names
    fn stem(&self) -> String {
        self.file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "board".to_string())
    }
}

impl BoardSource for BoardSnapshot {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn comment(&self, line: usize) -> String {
        self.comments.get(line).cloned().unwrap_or_default()
    }

    fn set_comment(&mut self, line: usize, text: &str) {
        if self.comments.len() <= line {
            self.comments.resize(line + 1, String::new());
        }
        self.comments[line] = text.to_string();
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn aux_origin(&self) -> (i64, i64) {
        self.aux_origin
    }

    fn set_solder_mask(&mut self, margin: i64, min_width: i64) {
        self.solder_mask_margin = margin;
        self.solder_mask_min_width = min_width;
    }

    fn is_layer_enabled(&self, layer: Layer) -> bool {
        self.enabled_layers.contains(&layer)
    }

    fn plot_layer(
        &self,
        step: &LayerPlanStep,
        options: &PlotOptions,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        let path = out_dir.join(format!("{}-{}.gbr", self.stem(), step.suffix));
        let mut contents = format!("G04 {}, {}*\n", self.stem(), step.description);
        if options.gerber_attributes {
            contents.push_str("%TF.GenerationSoftware,aisler-push*%\n");
        }
        contents.push_str("%FSLAX46Y46*%\n%MOMM*%\nM02*\n");
        fs::write(&path, contents)
            .map_err(|e| PushError::Board(format!("Failed to plot {}: {e}", step.suffix)))?;
        Ok(path)
    }

    fn write_drill_files(&self, options: &DrillOptions, out_dir: &Path) -> Result<()> {
        let write_one = |path: PathBuf| -> Result<()> {
            let mut contents = String::new();
            if options.include_header {
                contents.push_str("M48\nMETRIC\n%\n");
            }
            contents.push_str("M30\n");
            fs::write(&path, contents).map_err(|e| {
                PushError::Board(format!("Failed to write drill file {}: {e}", path.display()))
            })
        };

        write_one(out_dir.join(format!("{}-PTH.drl", self.stem())))?;
        if !options.merge_plated_and_unplated {
            write_one(out_dir.join(format!("{}-NPTH.drl", self.stem())))?;
        }
        Ok(())
    }

    fn write_netlist(&self, out_path: &Path) -> Result<()> {
        let contents = format!("P  JOB   {}\nP  UNITS CUST 1\n999\n", self.stem());
        fs::write(out_path, contents).map_err(|e| {
            PushError::Board(format!(
                "Failed to write netlist {}: {e}",
                out_path.display()
            ))
        })
    }

    fn parts(&self) -> Vec<PlacedPart> {
        self.parts.clone()
    }
}
