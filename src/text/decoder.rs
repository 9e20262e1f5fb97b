//! Decodes one tokenized text record into a catalog object.

use std::fmt::Display;
use std::str::FromStr;

use crate::constants::{ARCMIN_PER_DEGREE, HOURS_TO_DEG};
use crate::error::{CatalogError, Result};
use crate::math;
use crate::nebula::{Nebula, NebulaData};
use crate::text::identifiers::{parse_identifiers, Designator};
use crate::text::schema::{Field, TextSchema};
use crate::text::tokenizer::tokenize;
use crate::types::NebulaType;

/// Decodes `line` under the given schema into a fully built [`Nebula`].
///
/// Any field the schema does not carry — or carries as an empty token —
/// stays at its "unknown" sentinel; it is never defaulted to a value that
/// reads as measured. A field that is present but fails to parse fails the
/// whole record with [`CatalogError::MalformedRecord`]; the decoder never
/// aborts a batch on its own.
pub fn decode_record(line: &str, line_no: usize, schema: &TextSchema) -> Result<Nebula> {
    let tokens = tokenize(line, line_no, &schema.layout)?;
    let mut data = NebulaData::default();
    let mut pos = RawPosition::default();
    let mut size_arcmin: Option<f32> = None;

    for &(field, idx) in schema.fields {
        let raw = tokens.get(idx).copied().unwrap_or("").trim();
        if raw.is_empty() {
            continue;
        }
        match field {
            Field::Messier => data.messier = parse_num(raw, idx, line_no, line)?,
            Field::Ngc => {
                data.ngc = parse_num(raw, idx, line_no, line)?;
                // only a populated NGC column makes this a base-catalog
                // entry; an NGC number learned from the identifier list
                // does not
                data.in_base_catalog = data.ngc != 0;
            }
            Field::Ic => data.ic = parse_num(raw, idx, line_no, line)?,
            Field::Pgc => data.pgc = parse_num(raw, idx, line_no, line)?,
            Field::DreyerFlag => data.dreyer = true,
            Field::TypeCode => data.n_type = NebulaType::from_catalog_code(raw),
            Field::Constellation => data.constellation = Some(raw.to_string()),
            Field::RaHours => pos.ra_hours = Some(parse_num(raw, idx, line_no, line)?),
            Field::RaMinutes => pos.ra_minutes = Some(parse_num(raw, idx, line_no, line)?),
            Field::DecDegrees => pos.dec_degrees = Some(parse_num(raw, idx, line_no, line)?),
            Field::DecArcminutes => {
                pos.dec_arcminutes = Some(parse_num(raw, idx, line_no, line)?)
            }
            Field::RaDecimalDegrees => pos.ra_deg = Some(parse_num(raw, idx, line_no, line)?),
            Field::DecDecimalDegrees => pos.dec_deg = Some(parse_num(raw, idx, line_no, line)?),
            Field::Mag => data.mag = Some(parse_num(raw, idx, line_no, line)?),
            Field::MagB => data.mag_b = Some(parse_num(raw, idx, line_no, line)?),
            Field::MagV => data.mag_v = Some(parse_num(raw, idx, line_no, line)?),
            Field::SurfaceBrightness => {
                data.surface_brightness = Some(parse_num(raw, idx, line_no, line)?)
            }
            Field::AngularSizeArcmin => size_arcmin = Some(parse_num(raw, idx, line_no, line)?),
            Field::SizeMajorArcmin => data.size_major = Some(parse_num(raw, idx, line_no, line)?),
            Field::SizeMinorArcmin => data.size_minor = Some(parse_num(raw, idx, line_no, line)?),
            Field::PositionAngle => {
                data.position_angle = Some(parse_num(raw, idx, line_no, line)?)
            }
            Field::HubbleType => data.hubble_type = Some(raw.to_string()),
            Field::Redshift => data.redshift = Some(parse_num(raw, idx, line_no, line)?),
            Field::Distance => data.dist = Some(parse_num(raw, idx, line_no, line)?),
            Field::DistanceFromRedshift => {
                data.dist_z = Some(parse_num(raw, idx, line_no, line)?)
            }
            Field::Name => data.english_name = raw.to_string(),
            Field::Identifiers => apply_identifiers(&mut data, raw),
        }
    }

    // apparent magnitude prefers visual over blue when not given directly
    if data.mag.is_none() {
        data.mag = data.mag_v.or(data.mag_b);
    }
    if data.b_minus_v.is_none() {
        if let (Some(b), Some(v)) = (data.mag_b, data.mag_v) {
            data.b_minus_v = Some(b - v);
        }
    }
    if let Some(size) = size_arcmin {
        data.angular_size = size / ARCMIN_PER_DEGREE;
    } else if let Some(major) = data.size_major {
        data.angular_size = major / ARCMIN_PER_DEGREE;
    }

    let (ra_deg, dec_deg) = pos.resolve().ok_or_else(|| {
        CatalogError::malformed(line_no, position_field_index(schema), "missing position", line)
    })?;
    data.xyz = math::unit_from_spherical(ra_deg, dec_deg);
    data.orientation_axis = math::orientation_axis(
        ra_deg,
        dec_deg,
        data.position_angle.unwrap_or(0.0) as f64,
    );

    Ok(data.build())
}

/// Position fields as they appear on disk, before unit resolution.
#[derive(Debug, Default)]
struct RawPosition {
    ra_deg: Option<f64>,
    dec_deg: Option<f64>,
    ra_hours: Option<f64>,
    ra_minutes: Option<f64>,
    dec_degrees: Option<f64>,
    dec_arcminutes: Option<f64>,
}

impl RawPosition {
    /// Collapses either representation to decimal degrees.
    fn resolve(&self) -> Option<(f64, f64)> {
        let ra = self.ra_deg.or_else(|| {
            self.ra_hours
                .map(|h| (h + self.ra_minutes.unwrap_or(0.0) / 60.0) * HOURS_TO_DEG)
        })?;
        let dec = self.dec_deg.or_else(|| {
            self.dec_degrees.map(|d| {
                // the degrees token carries the sign, including "-0"
                let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
                d + sign * self.dec_arcminutes.unwrap_or(0.0) / 60.0
            })
        })?;
        Some((ra, dec))
    }
}

fn position_field_index(schema: &TextSchema) -> usize {
    schema
        .fields
        .iter()
        .find(|&&(field, _)| matches!(field, Field::RaDecimalDegrees | Field::RaHours))
        .map(|&(_, idx)| idx)
        .unwrap_or(0)
}

fn parse_num<T>(raw: &str, field: usize, line_no: usize, line: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| {
        CatalogError::malformed(line_no, field, format!("{:?}: {}", raw, e), line)
    })
}

/// Folds the parsed designator list into the identity fields. The first
/// designator wins each numeric slot; the first unrecognized one becomes
/// the alternate designation.
fn apply_identifiers(data: &mut NebulaData, raw: &str) {
    for designator in parse_identifiers(raw) {
        match designator {
            Designator::Messier(n) if data.messier == 0 => data.messier = n,
            Designator::Ngc(n) if data.ngc == 0 => data.ngc = n,
            Designator::Ic(n) if data.ic == 0 => data.ic = n,
            Designator::Pgc(n) if data.pgc == 0 => data.pgc = n,
            Designator::Other(s) if data.alt_designation.is_none() => {
                data.alt_designation = Some(s)
            }
            _ => {}
        }
    }
}
