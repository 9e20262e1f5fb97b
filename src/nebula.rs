//! The catalog object: one deep-sky entry and its derived quantities.
//!
//! A [`Nebula`] is constructed once — from a decoded text record or from the
//! binary codec — through the [`NebulaData`] bulk-populate builder, which
//! enforces the model's invariants at construction. After that the object is
//! immutable, except for the localized name injected by an external
//! translator ([`Nebula::set_localized_name`]).
//!
//! Numeric identity fields use `0` as the "not assigned" sentinel and are
//! never negative. Photometry and optional geometry use `Option`, so an
//! unknown magnitude can never be confused with a measured zero. Angular
//! size `0.0` means "unknown", not "point source".

use crate::config::{DisplayConfig, DisplayQuantities};
use crate::constants::{
    CLOSE_FOV_MARGIN, CROSS_REFERENCE_PENALTY, FAINT_MAG_LIMIT, MIN_CLOSE_FOV_DEG,
    SELECT_PRIORITY_OFFSET, SIZE_BONUS_CAP_DEG, SIZE_BONUS_WEIGHT,
};
use crate::math;
use crate::types::{ColorCategory, NebulaType};

/// Field-complete input for building a [`Nebula`].
///
/// Bulk loaders fill this plain struct and call [`build`](Self::build); the
/// builder, not the loader, owns the invariants. Absent values stay at their
/// sentinels (`0`, `None`, `0.0`), never at a zero that reads as measured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NebulaData {
    /// Messier number, 0 = unassigned.
    pub messier: u32,
    /// New General Catalogue number, 0 = unassigned.
    pub ngc: u32,
    /// Index Catalogue number, 0 = unassigned.
    pub ic: u32,
    /// Principal Galaxies Catalogue number, 0 = unassigned.
    pub pgc: u32,
    pub english_name: String,
    /// First designator from a catalog this model has no numeric slot for.
    pub alt_designation: Option<String>,
    /// Apparent magnitude.
    pub mag: Option<f32>,
    /// Blue (photographic) magnitude.
    pub mag_b: Option<f32>,
    /// Visual magnitude.
    pub mag_v: Option<f32>,
    /// Surface brightness, mag/arcmin².
    pub surface_brightness: Option<f32>,
    /// B−V color index.
    pub b_minus_v: Option<f32>,
    /// Whole-disc angular size in degrees, 0.0 = unknown.
    pub angular_size: f32,
    /// Major axis, arcminutes.
    pub size_major: Option<f32>,
    /// Minor axis, arcminutes.
    pub size_minor: Option<f32>,
    /// Position angle, degrees east of north.
    pub position_angle: Option<f32>,
    /// Unit Cartesian equatorial direction of the object centre.
    pub xyz: [f64; 3],
    /// Unit direction marking the major-axis orientation.
    pub orientation_axis: [f64; 3],
    pub n_type: NebulaType,
    /// Entry originates in the base (NGC) catalog proper.
    pub in_base_catalog: bool,
    /// Entry is attested in Dreyer's original catalogue.
    pub dreyer: bool,
    /// Constellation abbreviation.
    pub constellation: Option<String>,
    /// Hubble morphological type, galaxies only; per-schema optional.
    pub hubble_type: Option<String>,
    pub redshift: Option<f32>,
    /// Distance estimate, Mpc.
    pub dist: Option<f32>,
    /// Distance derived from redshift, Mpc.
    pub dist_z: Option<f32>,
}

impl NebulaData {
    /// Builds the immutable catalog object, normalizing invariants:
    /// non-finite optionals collapse to the unknown sentinel, angular size
    /// is clamped at zero, the position angle is taken modulo 360° and the
    /// direction vectors are normalized.
    pub fn build(self) -> Nebula {
        let angular_size = if self.angular_size.is_finite() && self.angular_size > 0.0 {
            self.angular_size
        } else {
            0.0
        };
        Nebula {
            messier: self.messier,
            ngc: self.ngc,
            ic: self.ic,
            pgc: self.pgc,
            english_name: self.english_name,
            localized_name: None,
            alt_designation: self.alt_designation.filter(|s| !s.is_empty()),
            mag: finite(self.mag),
            mag_b: finite(self.mag_b),
            mag_v: finite(self.mag_v),
            surface_brightness: finite(self.surface_brightness),
            b_minus_v: finite(self.b_minus_v),
            angular_size,
            size_major: finite(self.size_major),
            size_minor: finite(self.size_minor),
            position_angle: finite(self.position_angle).map(|pa| pa.rem_euclid(360.0)),
            xyz: math::normalize(self.xyz),
            orientation_axis: math::normalize(self.orientation_axis),
            n_type: self.n_type,
            in_base_catalog: self.in_base_catalog,
            dreyer: self.dreyer,
            constellation: self.constellation.filter(|s| !s.is_empty()),
            hubble_type: self.hubble_type.filter(|s| !s.is_empty()),
            redshift: finite(self.redshift),
            dist: finite(self.dist),
            dist_z: finite(self.dist_z),
        }
    }
}

fn finite(v: Option<f32>) -> Option<f32> {
    v.filter(|x| x.is_finite())
}

/// One deep-sky catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    messier: u32,
    ngc: u32,
    ic: u32,
    pgc: u32,
    english_name: String,
    localized_name: Option<String>,
    alt_designation: Option<String>,
    mag: Option<f32>,
    mag_b: Option<f32>,
    mag_v: Option<f32>,
    surface_brightness: Option<f32>,
    b_minus_v: Option<f32>,
    angular_size: f32,
    size_major: Option<f32>,
    size_minor: Option<f32>,
    position_angle: Option<f32>,
    xyz: [f64; 3],
    orientation_axis: [f64; 3],
    n_type: NebulaType,
    in_base_catalog: bool,
    dreyer: bool,
    constellation: Option<String>,
    hubble_type: Option<String>,
    redshift: Option<f32>,
    dist: Option<f32>,
    dist_z: Option<f32>,
}

impl Nebula {
    pub fn messier(&self) -> u32 {
        self.messier
    }

    pub fn ngc(&self) -> u32 {
        self.ngc
    }

    pub fn ic(&self) -> u32 {
        self.ic
    }

    pub fn pgc(&self) -> u32 {
        self.pgc
    }

    pub fn english_name(&self) -> &str {
        &self.english_name
    }

    /// Localized name if one was injected, else the English catalog name.
    pub fn localized_name(&self) -> &str {
        self.localized_name.as_deref().unwrap_or(&self.english_name)
    }

    /// Injects the externally translated display name. The only mutation a
    /// published object supports.
    pub fn set_localized_name(&mut self, name: impl Into<String>) {
        self.localized_name = Some(name.into());
    }

    pub fn alt_designation(&self) -> Option<&str> {
        self.alt_designation.as_deref()
    }

    pub fn mag(&self) -> Option<f32> {
        self.mag
    }

    pub fn mag_b(&self) -> Option<f32> {
        self.mag_b
    }

    pub fn mag_v(&self) -> Option<f32> {
        self.mag_v
    }

    pub fn surface_brightness(&self) -> Option<f32> {
        self.surface_brightness
    }

    pub fn b_minus_v(&self) -> Option<f32> {
        self.b_minus_v
    }

    /// Whole-disc angular size in degrees; 0.0 means unknown.
    pub fn angular_size(&self) -> f32 {
        self.angular_size
    }

    /// Angular radius in degrees — half the stored whole-disc size.
    pub fn angular_radius(&self) -> f32 {
        self.angular_size * 0.5
    }

    pub fn size_major(&self) -> Option<f32> {
        self.size_major
    }

    pub fn size_minor(&self) -> Option<f32> {
        self.size_minor
    }

    pub fn position_angle(&self) -> Option<f32> {
        self.position_angle
    }

    pub fn xyz(&self) -> [f64; 3] {
        self.xyz
    }

    pub fn orientation_axis(&self) -> [f64; 3] {
        self.orientation_axis
    }

    pub fn n_type(&self) -> NebulaType {
        self.n_type
    }

    pub fn in_base_catalog(&self) -> bool {
        self.in_base_catalog
    }

    pub fn is_dreyer_object(&self) -> bool {
        self.dreyer
    }

    pub fn constellation(&self) -> Option<&str> {
        self.constellation.as_deref()
    }

    pub fn hubble_type(&self) -> Option<&str> {
        self.hubble_type.as_deref()
    }

    pub fn redshift(&self) -> Option<f32> {
        self.redshift
    }

    pub fn dist(&self) -> Option<f32> {
        self.dist
    }

    pub fn dist_z(&self) -> Option<f32> {
        self.dist_z
    }

    /// Field of view, in degrees, that keeps the whole object in frame when
    /// a viewer zooms to it. Falls back to a fixed minimum when the angular
    /// size is unknown.
    pub fn close_view_fov(&self) -> f64 {
        if self.angular_size > 0.0 {
            self.angular_size as f64 * CLOSE_FOV_MARGIN
        } else {
            MIN_CLOSE_FOV_DEG
        }
    }

    /// Selection rank among overlapping candidates; lower wins.
    ///
    /// Driven by apparent magnitude, clamped at the faint limit when the
    /// magnitude is unknown (or meaningless, as for dark nebulae), minus a
    /// bounded bonus for larger angular size, plus a fixed penalty for
    /// cross-reference entries so the canonical record always outranks its
    /// duplicates.
    pub fn select_priority(&self) -> f32 {
        let mut lim = match self.mag {
            Some(m) if m < FAINT_MAG_LIMIT => m,
            _ => FAINT_MAG_LIMIT,
        };
        if self.n_type == NebulaType::DarkNebula {
            lim = FAINT_MAG_LIMIT;
        }
        let size_bonus = self.angular_size.min(SIZE_BONUS_CAP_DEG) * SIZE_BONUS_WEIGHT;
        let mut priority = lim - size_bonus - SELECT_PRIORITY_OFFSET;
        if self.n_type.is_cross_reference() {
            priority += CROSS_REFERENCE_PENALTY;
        }
        priority
    }

    /// Printable type label, e.g. "Galaxy" or "Open cluster".
    pub fn type_label(&self) -> &'static str {
        self.n_type.label()
    }

    pub fn color_category(&self) -> ColorCategory {
        self.n_type.color_category()
    }

    /// Bundles every derived quantity the renderer needs. The painter
    /// boundary: raw catalog fields stay on this side of it.
    pub fn display_quantities(&self, config: &DisplayConfig) -> DisplayQuantities {
        DisplayQuantities {
            priority: self.select_priority(),
            close_view_fov: self.close_view_fov(),
            type_label: self.type_label(),
            color: config.color_for(self.color_category()),
            circle_radius: self.angular_radius() * config.circle_scale,
            brightness: config.hints_brightness,
        }
    }
}
