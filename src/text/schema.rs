//! Table-driven descriptors for the historical text-record schemas.
//!
//! Text formats evolved across catalog revisions and are not
//! self-describing, so the caller selects a [`TextSchemaId`] out of band
//! (catalog file convention) and the decoder walks the schema's field
//! table. Delimiters and field positions live here, never at call sites.

/// Identifies one historical record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSchemaId {
    /// Revision 0: fixed-width columns from the original base catalog dump.
    Legacy,
    /// Revision 1: tab-separated columns with the extended photometric and
    /// geometric fields.
    Extended,
}

impl TextSchemaId {
    /// Selects the schema for a catalog revision index, `None` for a
    /// revision this build does not know.
    pub fn from_revision(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Legacy),
            1 => Some(Self::Extended),
            _ => None,
        }
    }

    pub fn schema(self) -> &'static TextSchema {
        match self {
            Self::Legacy => &LEGACY,
            Self::Extended => &EXTENDED,
        }
    }
}

/// How a raw line splits into positional fields.
#[derive(Debug, Clone, Copy)]
pub enum FieldLayout {
    /// Single-character separator. Empty fields are preserved as empty
    /// strings so positional indices stay stable.
    Delimited {
        separator: char,
        /// Records with fewer fields are rejected.
        min_fields: usize,
    },
    /// Byte-column ranges, end exclusive. Columns past the end of the line
    /// read as empty; lines shorter than `min_len` are rejected.
    FixedWidth {
        columns: &'static [(usize, usize)],
        min_len: usize,
    },
}

/// Semantic meaning of one positional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Messier,
    Ngc,
    Ic,
    Pgc,
    /// Non-empty when the entry is attested in Dreyer's catalogue.
    DreyerFlag,
    TypeCode,
    Constellation,
    RaHours,
    RaMinutes,
    /// Signed degrees part of the declination.
    DecDegrees,
    DecArcminutes,
    RaDecimalDegrees,
    DecDecimalDegrees,
    Mag,
    MagB,
    MagV,
    SurfaceBrightness,
    /// Whole-disc angular size, arcminutes.
    AngularSizeArcmin,
    SizeMajorArcmin,
    SizeMinorArcmin,
    PositionAngle,
    HubbleType,
    Redshift,
    Distance,
    DistanceFromRedshift,
    Name,
    /// Free-form designator list, handed to the identifier parser.
    Identifiers,
}

/// One record layout: how to split the line and what each field means.
#[derive(Debug, Clone, Copy)]
pub struct TextSchema {
    pub id: TextSchemaId,
    pub name: &'static str,
    pub layout: FieldLayout,
    /// `(field, token index)` pairs; a field missing here is simply absent
    /// from the schema and keeps its sentinel.
    pub fields: &'static [(Field, usize)],
}

const LEGACY_COLUMNS: &[(usize, usize)] = &[
    (0, 5),   // NGC number
    (6, 9),   // type code
    (10, 12), // RA hours
    (13, 17), // RA minutes
    (18, 21), // Dec degrees, signed
    (22, 24), // Dec arcminutes
    (25, 30), // apparent magnitude
    (31, 37), // angular size, arcmin
    (38, 70), // name
];

const LEGACY_FIELDS: &[(Field, usize)] = &[
    (Field::Ngc, 0),
    (Field::TypeCode, 1),
    (Field::RaHours, 2),
    (Field::RaMinutes, 3),
    (Field::DecDegrees, 4),
    (Field::DecArcminutes, 5),
    (Field::Mag, 6),
    (Field::AngularSizeArcmin, 7),
    (Field::Name, 8),
];

pub static LEGACY: TextSchema = TextSchema {
    id: TextSchemaId::Legacy,
    name: "legacy",
    layout: FieldLayout::FixedWidth {
        columns: LEGACY_COLUMNS,
        min_len: 30,
    },
    fields: LEGACY_FIELDS,
};

const EXTENDED_FIELDS: &[(Field, usize)] = &[
    (Field::Ngc, 0),
    (Field::Ic, 1),
    (Field::DreyerFlag, 2),
    (Field::TypeCode, 3),
    (Field::Constellation, 4),
    (Field::RaDecimalDegrees, 5),
    (Field::DecDecimalDegrees, 6),
    (Field::MagB, 7),
    (Field::MagV, 8),
    (Field::SurfaceBrightness, 9),
    (Field::SizeMajorArcmin, 10),
    (Field::SizeMinorArcmin, 11),
    (Field::PositionAngle, 12),
    (Field::HubbleType, 13),
    (Field::Redshift, 14),
    (Field::Distance, 15),
    (Field::DistanceFromRedshift, 16),
    (Field::Name, 17),
    (Field::Identifiers, 18),
];

pub static EXTENDED: TextSchema = TextSchema {
    id: TextSchemaId::Extended,
    name: "extended",
    layout: FieldLayout::Delimited {
        separator: '\t',
        min_fields: 7,
    },
    fields: EXTENDED_FIELDS,
};
