//! Binary catalog codec.
//!
//! The on-disk catalog has a 32-byte header followed by fixed-width records,
//! so `record_size × count` always locates any record from the header alone.
//! All multi-byte fields are little-endian; strings are zero-padded to fixed
//! widths. Two record shapes exist:
//!
//! | Shape | Selector | Size | Contents |
//! |-------|----------|------|----------|
//! | [`Baseline`](CatalogShape::Baseline) | 0 | 160 B | identity, photometry, geometry, positions, type, flags |
//! | [`Extended`](CatalogShape::Extended) | 1 | 192 B | baseline + constellation, Hubble type, redshift, distances |
//!
//! The shape is chosen by the header's selector (or an explicit parameter
//! for single-record calls), never sniffed from content — field widths alone
//! are not self-describing. Absent optional values encode as a quiet NaN
//! (`0.0` keeps its sentinel role for the angular size), so encoding is
//! byte-for-byte reproducible: no padding byte is ever left uninitialized.
//!
//! Changing any width or offset requires a new shape selector, not an
//! in-place edit.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{Read, Write};

use crate::error::{CatalogError, Result};
use crate::nebula::{Nebula, NebulaData};
use crate::types::NebulaType;

pub const CATALOG_MAGIC: &[u8; 4] = b"NEBC";
pub const FORMAT_VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 32;
pub const BASELINE_RECORD_SIZE: usize = 160;
pub const EXTENDED_RECORD_SIZE: usize = 192;

/// Fixed string-field widths, bytes. Part of the wire contract.
pub const NAME_WIDTH: usize = 32;
pub const ALT_DESIG_WIDTH: usize = 24;
pub const CONSTELLATION_WIDTH: usize = 4;
pub const HUBBLE_TYPE_WIDTH: usize = 12;

const FLAG_BASE_CATALOG: u8 = 1 << 0;
const FLAG_DREYER: u8 = 1 << 1;

/// A named record layout. Part of the compatibility contract: selectors are
/// append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogShape {
    Baseline,
    Extended,
}

impl CatalogShape {
    /// Resolves a shape selector.
    ///
    /// # Errors
    /// [`CatalogError::VersionMismatch`] if the selector names no known
    /// shape — batch-fatal, since the record size is then unknown.
    pub fn from_selector(selector: u32) -> Result<Self> {
        match selector {
            0 => Ok(Self::Baseline),
            1 => Ok(Self::Extended),
            _ => Err(CatalogError::VersionMismatch { selector }),
        }
    }

    pub const fn selector(self) -> u32 {
        match self {
            Self::Baseline => 0,
            Self::Extended => 1,
        }
    }

    pub const fn record_size(self) -> usize {
        match self {
            Self::Baseline => BASELINE_RECORD_SIZE,
            Self::Extended => EXTENDED_RECORD_SIZE,
        }
    }
}

/// Metadata carried by the 32-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogHeader {
    pub shape: CatalogShape,
    pub record_count: u64,
}

pub fn write_header<W: Write>(w: &mut W, header: &CatalogHeader) -> Result<()> {
    let mut buf = [0u8; HEADER_SIZE];
    buf[0..4].copy_from_slice(CATALOG_MAGIC);
    LittleEndian::write_u32(&mut buf[4..8], FORMAT_VERSION);
    LittleEndian::write_u32(&mut buf[8..12], header.shape.selector());
    // bytes 12..16 reserved
    LittleEndian::write_u64(&mut buf[16..24], header.record_count);
    // bytes 24..32 reserved
    w.write_all(&buf)?;
    Ok(())
}

pub fn read_header<R: Read>(r: &mut R) -> Result<CatalogHeader> {
    let mut buf = [0u8; HEADER_SIZE];
    r.read_exact(&mut buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            CatalogError::InvalidHeader("stream shorter than the catalog header".to_string())
        } else {
            CatalogError::Io(e)
        }
    })?;
    if &buf[0..4] != CATALOG_MAGIC {
        return Err(CatalogError::InvalidHeader(format!(
            "bad magic {:?}, expected {:?}",
            &buf[0..4],
            CATALOG_MAGIC
        )));
    }
    let version = LittleEndian::read_u32(&buf[4..8]);
    if version != FORMAT_VERSION {
        return Err(CatalogError::InvalidHeader(format!(
            "unsupported format version {version}"
        )));
    }
    let shape = CatalogShape::from_selector(LittleEndian::read_u32(&buf[8..12]))?;
    let record_count = LittleEndian::read_u64(&buf[16..24]);
    Ok(CatalogHeader {
        shape,
        record_count,
    })
}

/// Encodes one record. Deterministic: the same object and shape always
/// produce identical bytes.
pub fn write_record<W: Write>(w: &mut W, nebula: &Nebula, shape: CatalogShape) -> Result<()> {
    let mut buf = [0u8; EXTENDED_RECORD_SIZE];
    encode_baseline(&mut buf, nebula);
    if shape == CatalogShape::Extended {
        encode_extended_tail(&mut buf, nebula);
    }
    w.write_all(&buf[..shape.record_size()])?;
    Ok(())
}

/// Decodes one record from a positioned stream. `index` is only used to
/// report where a truncation happened.
///
/// # Errors
/// [`CatalogError::TruncatedRecord`] if the stream ends mid-record; the
/// batch must be abandoned since later offsets are unrecoverable.
pub fn read_record<R: Read>(r: &mut R, shape: CatalogShape, index: u64) -> Result<Nebula> {
    let mut buf = [0u8; EXTENDED_RECORD_SIZE];
    let size = shape.record_size();
    r.read_exact(&mut buf[..size]).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            CatalogError::TruncatedRecord { index }
        } else {
            CatalogError::Io(e)
        }
    })?;
    Ok(decode_record_buf(&buf[..size], shape))
}

/// Writes a complete catalog file: header plus every record in `objects`.
pub fn write_catalog<W: Write>(w: &mut W, objects: &[Nebula], shape: CatalogShape) -> Result<()> {
    write_header(
        w,
        &CatalogHeader {
            shape,
            record_count: objects.len() as u64,
        },
    )?;
    for nebula in objects {
        write_record(w, nebula, shape)?;
    }
    Ok(())
}

/// Reads a complete catalog file, returning the shape the header selected
/// and the decoded objects in file order.
pub fn read_catalog<R: Read>(r: &mut R) -> Result<(CatalogShape, Vec<Nebula>)> {
    let header = read_header(r)?;
    // the count is untrusted until the stream proves it
    let mut objects = Vec::with_capacity(header.record_count.min(65_536) as usize);
    for index in 0..header.record_count {
        objects.push(read_record(r, header.shape, index)?);
    }
    Ok((header.shape, objects))
}

fn encode_baseline(buf: &mut [u8], n: &Nebula) {
    LittleEndian::write_u32(&mut buf[0..4], n.messier());
    LittleEndian::write_u32(&mut buf[4..8], n.ngc());
    LittleEndian::write_u32(&mut buf[8..12], n.ic());
    LittleEndian::write_u32(&mut buf[12..16], n.pgc());
    write_string(&mut buf[16..48], n.english_name());
    write_string(&mut buf[48..72], n.alt_designation().unwrap_or(""));
    write_opt_f32(&mut buf[72..76], n.mag());
    write_opt_f32(&mut buf[76..80], n.mag_b());
    write_opt_f32(&mut buf[80..84], n.mag_v());
    write_opt_f32(&mut buf[84..88], n.surface_brightness());
    write_opt_f32(&mut buf[88..92], n.b_minus_v());
    LittleEndian::write_f32(&mut buf[92..96], n.angular_size());
    write_opt_f32(&mut buf[96..100], n.size_major());
    write_opt_f32(&mut buf[100..104], n.size_minor());
    write_opt_f32(&mut buf[104..108], n.position_angle());
    buf[108] = n.n_type().wire_code();
    buf[109] = encode_flags(n);
    // bytes 110..112 reserved
    write_vec3(&mut buf[112..136], n.xyz());
    write_vec3(&mut buf[136..160], n.orientation_axis());
}

fn encode_extended_tail(buf: &mut [u8], n: &Nebula) {
    write_string(&mut buf[160..164], n.constellation().unwrap_or(""));
    write_string(&mut buf[164..176], n.hubble_type().unwrap_or(""));
    write_opt_f32(&mut buf[176..180], n.redshift());
    write_opt_f32(&mut buf[180..184], n.dist());
    write_opt_f32(&mut buf[184..188], n.dist_z());
    // bytes 188..192 reserved
}

fn decode_record_buf(buf: &[u8], shape: CatalogShape) -> Nebula {
    let mut data = NebulaData {
        messier: LittleEndian::read_u32(&buf[0..4]),
        ngc: LittleEndian::read_u32(&buf[4..8]),
        ic: LittleEndian::read_u32(&buf[8..12]),
        pgc: LittleEndian::read_u32(&buf[12..16]),
        english_name: read_string(&buf[16..48]),
        alt_designation: read_opt_string(&buf[48..72]),
        mag: read_opt_f32(&buf[72..76]),
        mag_b: read_opt_f32(&buf[76..80]),
        mag_v: read_opt_f32(&buf[80..84]),
        surface_brightness: read_opt_f32(&buf[84..88]),
        b_minus_v: read_opt_f32(&buf[88..92]),
        angular_size: LittleEndian::read_f32(&buf[92..96]),
        size_major: read_opt_f32(&buf[96..100]),
        size_minor: read_opt_f32(&buf[100..104]),
        position_angle: read_opt_f32(&buf[104..108]),
        n_type: NebulaType::from_wire(buf[108]),
        in_base_catalog: buf[109] & FLAG_BASE_CATALOG != 0,
        dreyer: buf[109] & FLAG_DREYER != 0,
        xyz: read_vec3(&buf[112..136]),
        orientation_axis: read_vec3(&buf[136..160]),
        ..Default::default()
    };
    if shape == CatalogShape::Extended {
        data.constellation = read_opt_string(&buf[160..164]);
        data.hubble_type = read_opt_string(&buf[164..176]);
        data.redshift = read_opt_f32(&buf[176..180]);
        data.dist = read_opt_f32(&buf[180..184]);
        data.dist_z = read_opt_f32(&buf[184..188]);
    }
    data.build()
}

fn encode_flags(n: &Nebula) -> u8 {
    let mut flags = 0;
    if n.in_base_catalog() {
        flags |= FLAG_BASE_CATALOG;
    }
    if n.is_dreyer_object() {
        flags |= FLAG_DREYER;
    }
    flags
}

fn write_opt_f32(buf: &mut [u8], v: Option<f32>) {
    LittleEndian::write_f32(buf, v.unwrap_or(f32::NAN));
}

fn read_opt_f32(buf: &[u8]) -> Option<f32> {
    let v = LittleEndian::read_f32(buf);
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

fn write_vec3(buf: &mut [u8], v: [f64; 3]) {
    LittleEndian::write_f64(&mut buf[0..8], v[0]);
    LittleEndian::write_f64(&mut buf[8..16], v[1]);
    LittleEndian::write_f64(&mut buf[16..24], v[2]);
}

fn read_vec3(buf: &[u8]) -> [f64; 3] {
    [
        LittleEndian::read_f64(&buf[0..8]),
        LittleEndian::read_f64(&buf[8..16]),
        LittleEndian::read_f64(&buf[16..24]),
    ]
}

/// Zero-pads `s` into `buf`, truncating on a character boundary when the
/// field is too narrow.
fn write_string(buf: &mut [u8], s: &str) {
    let mut end = s.len().min(buf.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    buf[..end].copy_from_slice(&s.as_bytes()[..end]);
    for byte in buf.iter_mut().skip(end) {
        *byte = 0;
    }
}

fn read_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

fn read_opt_string(buf: &[u8]) -> Option<String> {
    let s = read_string(buf);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_extended() -> Nebula {
        NebulaData {
            messier: 31,
            ngc: 224,
            ic: 0,
            pgc: 2557,
            english_name: "Andromeda Galaxy".to_string(),
            alt_designation: Some("UGC 454".to_string()),
            mag: Some(3.4),
            mag_b: Some(4.36),
            mag_v: Some(3.44),
            surface_brightness: Some(13.5),
            b_minus_v: Some(0.92),
            angular_size: 3.167,
            size_major: Some(190.0),
            size_minor: Some(60.0),
            position_angle: Some(35.0),
            xyz: [0.72, 0.13, 0.68],
            orientation_axis: [0.1, 0.2, 0.97],
            n_type: NebulaType::Galaxy,
            in_base_catalog: true,
            dreyer: true,
            constellation: Some("And".to_string()),
            hubble_type: Some("SA(s)b".to_string()),
            redshift: Some(-0.001),
            dist: Some(0.778),
            dist_z: None,
        }
        .build()
    }

    fn sample_sparse() -> Nebula {
        NebulaData {
            ngc: 6960,
            english_name: "Veil Nebula (west)".to_string(),
            n_type: NebulaType::EmissionNebula,
            xyz: [0.3, -0.8, 0.5],
            orientation_axis: [0.0, 0.0, 1.0],
            in_base_catalog: true,
            ..Default::default()
        }
        .build()
    }

    fn round_trip(n: &Nebula, shape: CatalogShape) -> Nebula {
        let mut buf = Vec::new();
        write_record(&mut buf, n, shape).unwrap();
        assert_eq!(buf.len(), shape.record_size());
        read_record(&mut Cursor::new(buf), shape, 0).unwrap()
    }

    #[test]
    fn test_round_trip_extended() {
        let n = sample_extended();
        assert_eq!(round_trip(&n, CatalogShape::Extended), n);
    }

    #[test]
    fn test_round_trip_baseline_drops_context_fields() {
        let n = sample_extended();
        let back = round_trip(&n, CatalogShape::Baseline);
        assert_eq!(back.ngc(), n.ngc());
        assert_eq!(back.mag(), n.mag());
        assert_eq!(back.constellation(), None);
        assert_eq!(back.hubble_type(), None);
        assert_eq!(back.redshift(), None);
    }

    #[test]
    fn test_round_trip_sparse_keeps_sentinels() {
        let n = sample_sparse();
        for shape in [CatalogShape::Baseline, CatalogShape::Extended] {
            let back = round_trip(&n, shape);
            assert_eq!(back, n, "shape {:?}", shape);
            assert_eq!(back.mag(), None);
            assert_eq!(back.angular_size(), 0.0);
            assert_eq!(back.messier(), 0);
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let n = sample_extended();
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_record(&mut a, &n, CatalogShape::Extended).unwrap();
        write_record(&mut b, &n, CatalogShape::Extended).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_truncated_record_reports_index() {
        let mut buf = Vec::new();
        write_catalog(
            &mut buf,
            &[sample_extended(), sample_sparse()],
            CatalogShape::Extended,
        )
        .unwrap();
        buf.truncate(HEADER_SIZE + EXTENDED_RECORD_SIZE + 10);

        let err = read_catalog(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, CatalogError::TruncatedRecord { index: 1 }));
    }

    #[test]
    fn test_unknown_shape_selector() {
        let mut buf = Vec::new();
        write_catalog(&mut buf, &[sample_sparse()], CatalogShape::Baseline).unwrap();
        LittleEndian::write_u32(&mut buf[8..12], 7);

        let err = read_catalog(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, CatalogError::VersionMismatch { selector: 7 }));
    }

    #[test]
    fn test_bad_magic() {
        let mut buf = Vec::new();
        write_catalog(&mut buf, &[], CatalogShape::Baseline).unwrap();
        buf[0..4].copy_from_slice(b"XXXX");

        let err = read_catalog(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidHeader(_)));
    }

    #[test]
    fn test_unsupported_format_version() {
        let mut buf = Vec::new();
        write_catalog(&mut buf, &[], CatalogShape::Baseline).unwrap();
        LittleEndian::write_u32(&mut buf[4..8], 99);

        let err = read_catalog(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidHeader(_)));
    }

    #[test]
    fn test_catalog_file_layout() {
        let objects = vec![sample_extended(), sample_sparse()];
        let mut buf = Vec::new();
        write_catalog(&mut buf, &objects, CatalogShape::Extended).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE + 2 * EXTENDED_RECORD_SIZE);

        let (shape, back) = read_catalog(&mut Cursor::new(buf)).unwrap();
        assert_eq!(shape, CatalogShape::Extended);
        assert_eq!(back, objects);
    }

    #[test]
    fn test_every_type_byte_decodes() {
        let n = sample_sparse();
        let mut buf = Vec::new();
        write_record(&mut buf, &n, CatalogShape::Baseline).unwrap();
        for code in 0..=u8::MAX {
            buf[108] = code;
            let back = read_record(&mut Cursor::new(&buf), CatalogShape::Baseline, 0).unwrap();
            if code > 13 {
                assert_eq!(back.n_type(), NebulaType::Unknown);
            } else {
                assert_eq!(back.n_type().wire_code(), code);
            }
        }
    }

    #[test]
    fn test_name_truncated_at_field_width() {
        let n = NebulaData {
            english_name: "x".repeat(NAME_WIDTH + 20),
            xyz: [1.0, 0.0, 0.0],
            orientation_axis: [0.0, 0.0, 1.0],
            ..Default::default()
        }
        .build();
        let back = round_trip(&n, CatalogShape::Baseline);
        assert_eq!(back.english_name().len(), NAME_WIDTH);
    }

    #[test]
    fn test_string_field_widths() {
        // widths are part of the wire contract
        assert_eq!(NAME_WIDTH + ALT_DESIG_WIDTH, 56);
        assert_eq!(CONSTELLATION_WIDTH, 4);
        assert_eq!(HUBBLE_TYPE_WIDTH, 12);
        assert_eq!(
            EXTENDED_RECORD_SIZE - BASELINE_RECORD_SIZE,
            CONSTELLATION_WIDTH + HUBBLE_TYPE_WIDTH + 3 * 4 + 4
        );
    }
}
