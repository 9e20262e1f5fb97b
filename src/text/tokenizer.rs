//! Splits one raw catalog line into positional field strings.

use crate::error::{CatalogError, Result};
use crate::text::schema::FieldLayout;

/// Tokenizes `line` according to the schema layout. Empty fields are kept
/// as empty strings so positional indices stay stable across records.
///
/// # Errors
/// [`CatalogError::MalformedRecord`] if the line is shorter than the layout
/// requires. Record-local: the batch continues at the caller's discretion.
pub fn tokenize<'a>(line: &'a str, line_no: usize, layout: &FieldLayout) -> Result<Vec<&'a str>> {
    match *layout {
        FieldLayout::Delimited {
            separator,
            min_fields,
        } => {
            let fields: Vec<&str> = line.split(separator).map(str::trim).collect();
            if fields.len() < min_fields {
                return Err(CatalogError::malformed(
                    line_no,
                    0,
                    format!("expected at least {} fields, got {}", min_fields, fields.len()),
                    line,
                ));
            }
            Ok(fields)
        }
        FieldLayout::FixedWidth { columns, min_len } => {
            if line.len() < min_len {
                return Err(CatalogError::malformed(
                    line_no,
                    0,
                    format!("record shorter than {} bytes", min_len),
                    line,
                ));
            }
            let bytes = line.as_bytes();
            let mut fields = Vec::with_capacity(columns.len());
            for (i, &(start, end)) in columns.iter().enumerate() {
                let token = if start >= bytes.len() {
                    ""
                } else {
                    let end = end.min(bytes.len());
                    std::str::from_utf8(&bytes[start..end]).map_err(|_| {
                        CatalogError::malformed(line_no, i, "invalid utf-8 in column", line)
                    })?
                };
                fields.push(token.trim());
            }
            Ok(fields)
        }
    }
}
