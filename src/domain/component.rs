//! Component catalog types
//!
//! Normalized records for every placed part on a design, in the shape the
//! fabrication service ingests: positions in millimeters relative to the
//! auxiliary origin (y flipped), a top/bottom side, a surface-mount or
//! through-hole classification, and a placement flag.

use serde::{Deserialize, Serialize};

/// Through-hole attribute bit on a placed part.
pub const ATTR_THROUGH_HOLE: u32 = 1 << 0;
/// Surface-mount attribute bit on a placed part.
pub const ATTR_SMD: u32 = 1 << 1;
/// Part is excluded from position files.
pub const ATTR_EXCLUDE_FROM_POS_FILES: u32 = 1 << 2;
/// Part is excluded from the bill of materials.
pub const ATTR_EXCLUDE_FROM_BOM: u32 = 1 << 3;
/// Part exists on the board only (no BOM, no placement).
pub const ATTR_BOARD_ONLY: u32 = 1 << 4;

/// Which copper side a part is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Front copper
    Top,
    /// Back copper
    Bottom,
}

/// Mount-type classification of a part
///
/// A part is `Smt` exactly when its surface-mount attribute bit is set.
/// Everything else, including parts with neither bit set, is `Tht`. That
/// tie-break is the documented policy, not a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    /// Surface-mount
    Smt,
    /// Through-hole
    Tht,
}

/// Independent booleans decoded from a part's attribute bit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartAttributes {
    /// Through-hole bit
    pub through_hole: bool,
    /// Surface-mount bit
    pub surface_mount: bool,
    /// Excluded from position files
    pub exclude_from_pos_files: bool,
    /// Excluded from the bill of materials
    pub exclude_from_bom: bool,
    /// Board-only part
    pub board_only: bool,
}

impl PartAttributes {
    /// Decodes the raw attribute word into independent booleans
    pub fn from_bits(attrs: u32) -> Self {
        Self {
            through_hole: attrs & ATTR_THROUGH_HOLE == ATTR_THROUGH_HOLE,
            surface_mount: attrs & ATTR_SMD == ATTR_SMD,
            exclude_from_pos_files: attrs & ATTR_EXCLUDE_FROM_POS_FILES
                == ATTR_EXCLUDE_FROM_POS_FILES,
            exclude_from_bom: attrs & ATTR_EXCLUDE_FROM_BOM == ATTR_EXCLUDE_FROM_BOM,
            board_only: attrs & ATTR_BOARD_ONLY == ATTR_BOARD_ONLY,
        }
    }

    /// Classifies the mount type
    ///
    /// `smt` if the surface-mount bit is set, otherwise `tht` regardless of
    /// the through-hole bit.
    pub fn mount_type(&self) -> MountType {
        if self.surface_mount {
            MountType::Smt
        } else {
            MountType::Tht
        }
    }

    /// Placement flag: true unless the part is excluded from the BOM
    pub fn place(&self) -> bool {
        !self.exclude_from_bom
    }
}

/// One normalized entry in the component catalog
///
/// Serialized as one object of the JSON array shipped inside the
/// manufacturing package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// X position in millimeters relative to the auxiliary origin
    pub pos_x: f64,

    /// Y position in millimeters, mirrored relative to the auxiliary origin
    pub pos_y: f64,

    /// Rotation in degrees
    pub rotation: f64,

    /// Copper side, absent when the part sits on neither copper layer
    pub side: Option<Side>,

    /// Reference designator, e.g. `R1`
    pub designator: String,

    /// Manufacturer part number, if any MPN field is present
    pub mpn: Option<String>,

    /// Footprint/package name from the part's library item
    pub pack: String,

    /// Value string, e.g. `10k`
    pub value: String,

    /// Surface-mount or through-hole classification
    pub mount_type: MountType,

    /// True unless the part is excluded from the bill of materials
    pub place: bool,
}
