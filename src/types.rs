//! The closed deep-sky object taxonomy and its fixed code tables.
//!
//! [`NebulaType`] covers every tag a catalog record can carry, including the
//! two warning tags ([`Duplicate`](NebulaType::Duplicate),
//! [`InNgcCatalog`](NebulaType::InNgcCatalog)) that mark a record as a
//! cross-reference rather than a distinct physical object. The enum
//! discriminants are the binary wire codes: append new tags at the end,
//! never renumber existing ones.

/// Physical (or administrative) type of a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NebulaType {
    /// Galaxy.
    Galaxy = 0,
    /// Open star cluster.
    OpenCluster = 1,
    /// Globular star cluster, usually in the Milky Way Galaxy.
    GlobularCluster = 2,
    /// Bright emission or reflection nebula (legacy generic tag).
    Nebula = 3,
    /// Planetary nebula.
    PlanetaryNebula = 4,
    /// Dark nebula.
    DarkNebula = 5,
    /// Catalogued but never classified ("Ig" in the source tables).
    Unclassified = 6,
    /// Cluster associated with nebulosity.
    ClusterWithNebulosity = 7,
    /// Type code absent or not in the mapping table.
    #[default]
    Unknown = 8,
    /// Galactic nebula.
    GalacticNebula = 9,
    /// Emission nebula.
    EmissionNebula = 10,
    /// Warning: repeats another catalog entry.
    Duplicate = 11,
    /// Warning: object already present in the NGC catalogue proper.
    InNgcCatalog = 12,
    /// The "nebula" is actually a star.
    Star = 13,
}

/// Source-catalog type codes and the tags they map to. Matching is
/// case-insensitive on the trimmed code.
const TYPE_CODE_TABLE: &[(&str, NebulaType)] = &[
    ("Gx", NebulaType::Galaxy),
    ("OC", NebulaType::OpenCluster),
    ("Gb", NebulaType::GlobularCluster),
    ("GC", NebulaType::GlobularCluster),
    ("Nb", NebulaType::Nebula),
    ("Pl", NebulaType::PlanetaryNebula),
    ("PN", NebulaType::PlanetaryNebula),
    ("Dn", NebulaType::DarkNebula),
    ("Ig", NebulaType::Unclassified),
    ("C+N", NebulaType::ClusterWithNebulosity),
    ("GNe", NebulaType::GalacticNebula),
    ("EmN", NebulaType::EmissionNebula),
    ("Dup", NebulaType::Duplicate),
    ("InNGC", NebulaType::InNgcCatalog),
    ("*", NebulaType::Star),
    ("Star", NebulaType::Star),
];

impl NebulaType {
    /// The frozen binary code for this tag.
    pub const fn wire_code(self) -> u8 {
        self as u8
    }

    /// Decodes a binary type code. Total: codes outside the table yield
    /// [`Unknown`](Self::Unknown), never an error.
    pub fn from_wire(code: u8) -> Self {
        match code {
            0 => Self::Galaxy,
            1 => Self::OpenCluster,
            2 => Self::GlobularCluster,
            3 => Self::Nebula,
            4 => Self::PlanetaryNebula,
            5 => Self::DarkNebula,
            6 => Self::Unclassified,
            7 => Self::ClusterWithNebulosity,
            8 => Self::Unknown,
            9 => Self::GalacticNebula,
            10 => Self::EmissionNebula,
            11 => Self::Duplicate,
            12 => Self::InNgcCatalog,
            13 => Self::Star,
            _ => Self::Unknown,
        }
    }

    /// Maps a source-catalog type code. Total: an unknown code is expected
    /// input (an unclassified entry), not corruption, and yields
    /// [`Unknown`](Self::Unknown).
    pub fn from_catalog_code(code: &str) -> Self {
        let code = code.trim();
        for &(pattern, tag) in TYPE_CODE_TABLE {
            if code.eq_ignore_ascii_case(pattern) {
                return tag;
            }
        }
        Self::Unknown
    }

    /// Short printable label. Warning tags read as references, not objects.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Galaxy => "Galaxy",
            Self::OpenCluster => "Open cluster",
            Self::GlobularCluster => "Globular cluster",
            Self::Nebula => "Nebula",
            Self::PlanetaryNebula => "Planetary nebula",
            Self::DarkNebula => "Dark nebula",
            Self::Unclassified => "Unclassified object",
            Self::ClusterWithNebulosity => "Cluster associated with nebulosity",
            Self::Unknown => "Unknown",
            Self::GalacticNebula => "Galactic nebula",
            Self::EmissionNebula => "Emission nebula",
            Self::Duplicate => "Duplicate of another entry",
            Self::InNgcCatalog => "Cross-reference to an NGC entry",
            Self::Star => "Star",
        }
    }

    /// `true` for tags marking the record as a pointer to another entry.
    /// Such records carry no independent photometry and exist only to
    /// resolve identifier lookups onto the canonical object.
    pub const fn is_cross_reference(self) -> bool {
        matches!(self, Self::Duplicate | Self::InNgcCatalog)
    }

    /// Display-color bucket consumed by the hint painter.
    pub const fn color_category(self) -> ColorCategory {
        match self {
            Self::Galaxy => ColorCategory::Galaxy,
            Self::OpenCluster | Self::GlobularCluster | Self::ClusterWithNebulosity => {
                ColorCategory::Cluster
            }
            Self::Star => ColorCategory::Star,
            Self::Duplicate | Self::InNgcCatalog => ColorCategory::Reference,
            _ => ColorCategory::Nebula,
        }
    }
}

/// Coarse display-color buckets for hint markers and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Galaxy,
    Cluster,
    Nebula,
    Star,
    Reference,
}
