//! Board design-source boundary
//!
//! The CAD engine that owns geometry, layers, and footprints sits behind the
//! [`BoardSource`] trait. The pipeline only reads the design, apart from one
//! in-memory write to the designated title-block comment line, and asks the
//! collaborator to render manufacturing artifacts into a scratch directory.

use crate::domain::{Result, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Physical board layers the export plan can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    FrontCopper,
    BackCopper,
    FrontPaste,
    BackPaste,
    FrontSilk,
    BackSilk,
    FrontMask,
    BackMask,
    EdgeCuts,
}

/// One step of the ordered layer plan
///
/// The plan is fixed per configuration; each step names the layer, the
/// filename suffix of the rendered plot, and a human-readable description
/// passed through to the plotter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPlanStep {
    /// Layer to render
    pub layer: Layer,

    /// Filename suffix, e.g. `CuTop`
    pub suffix: String,

    /// Plot sheet description, e.g. `Top layer`
    pub description: String,
}

impl LayerPlanStep {
    /// Creates a plan step
    pub fn new(layer: Layer, suffix: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            layer,
            suffix: suffix.into(),
            description: description.into(),
        }
    }
}

/// Photoplotter option set
///
/// The pipeline always plots with one fixed option set; the remote CAM
/// applies its own rules, so nothing here is user-tunable.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Draw the drawing-sheet frame reference
    pub plot_frame_ref: bool,

    /// Line width for sketched pads, in millimeters
    pub sketch_pad_line_width_mm: f64,

    /// Scale plots automatically to fit the sheet
    pub auto_scale: bool,

    /// Fixed scale factor
    pub scale: f64,

    /// Mirror the plot
    pub mirror: bool,

    /// Emit Gerber X2 manufacturer attributes
    pub gerber_attributes: bool,

    /// Use Protel filename extensions instead of `.gbr`
    pub protel_extensions: bool,

    /// Emit coordinates relative to the auxiliary origin
    pub use_aux_origin: bool,

    /// Subtract the soldermask from the silkscreen
    pub subtract_mask_from_silk: bool,

    /// Draw drill-shape markers on copper layers
    pub drill_marks: bool,
}

impl PlotOptions {
    /// The fixed Gerber option set used for every export
    pub fn gerber_defaults() -> Self {
        Self {
            plot_frame_ref: false,
            sketch_pad_line_width_mm: 0.1,
            auto_scale: false,
            scale: 1.0,
            mirror: false,
            gerber_attributes: true,
            protel_extensions: false,
            use_aux_origin: true,
            subtract_mask_from_silk: false,
            drill_marks: false,
        }
    }
}

/// Excellon drill-file option set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillOptions {
    /// Mirror drill coordinates
    pub mirror: bool,

    /// Write the full Excellon header
    pub include_header: bool,

    /// Coordinate offset, in design units (the auxiliary origin)
    pub offset: (i64, i64),

    /// Merge plated and non-plated holes into one file
    pub merge_plated_and_unplated: bool,

    /// Also generate drill map files
    pub generate_map: bool,
}

impl DrillOptions {
    /// The fixed drill option set, anchored at the given auxiliary origin
    pub fn excellon_defaults(offset: (i64, i64)) -> Self {
        Self {
            mirror: false,
            include_header: true,
            offset,
            merge_plated_and_unplated: false,
            generate_map: false,
        }
    }
}

/// Snapshot of one placed part, as handed over by the design source
///
/// Positions and the auxiliary origin are in the design's internal integer
/// unit (nanometers); the catalog builder converts to millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPart {
    /// Reference designator, e.g. `C3`
    pub reference: String,

    /// Value string
    pub value: String,

    /// Library item name of the footprint. Design sources that lack the
    /// primary accessor resolve this through their fallback accessor before
    /// handing the part over.
    pub footprint: String,

    /// Raw position in design units
    pub position: (i64, i64),

    /// Orientation in degrees
    pub rotation_degrees: f64,

    /// Copper layer the part sits on, if it sits on one at all
    pub copper_layer: Option<Side>,

    /// Raw attribute bit flags (see [`crate::domain::PartAttributes`])
    pub attributes: u32,

    /// Named text fields, looked up case-sensitively
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl PlacedPart {
    /// Case-sensitive field lookup by exact name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// The design-source collaborator
///
/// Everything the pipeline needs from the CAD engine: title-block access,
/// design parameters, the parts collection, the property map, the backing
/// file path, and the three artifact renderers.
pub trait BoardSource: Send {
    /// Path of the design's backing file
    fn file_path(&self) -> &Path;

    /// Title from the title block; may be empty
    fn title(&self) -> String;

    /// Text of one title-block comment line; empty if the line is unset
    fn comment(&self, line: usize) -> String;

    /// Sets one title-block comment line, in memory only
    fn set_comment(&mut self, line: usize, text: &str);

    /// Free-form property map lookup
    fn property(&self, key: &str) -> Option<String>;

    /// Auxiliary origin in design units
    fn aux_origin(&self) -> (i64, i64);

    /// Overrides the solder-mask margin and minimum width, in memory only
    fn set_solder_mask(&mut self, margin: i64, min_width: i64);

    /// Whether the design has this layer enabled
    fn is_layer_enabled(&self, layer: Layer) -> bool;

    /// Renders one layer as a Gerber plot into `out_dir`, returning the
    /// rendered file's path
    fn plot_layer(
        &self,
        step: &LayerPlanStep,
        options: &PlotOptions,
        out_dir: &Path,
    ) -> Result<PathBuf>;

    /// Writes the Excellon drill file set into `out_dir`
    fn write_drill_files(&self, options: &DrillOptions, out_dir: &Path) -> Result<()>;

    /// Writes the bare-board netlist document to `out_path`
    fn write_netlist(&self, out_path: &Path) -> Result<()>;

    /// Snapshot of all placed parts, in design-native iteration order
    fn parts(&self) -> Vec<PlacedPart>;
}
