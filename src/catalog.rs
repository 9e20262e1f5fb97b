//! Batch loading and the published in-memory catalog table.
//!
//! Ingestion is one pass over the source. The loader owns the object table
//! exclusively while it runs; [`NebulaCatalog::publish`] then freezes it, and
//! everything downstream (identifier lookup, hint painting) reads the
//! published table immutably. Text records are independent, so decoding
//! fans out across worker threads on disjoint line ranges and reassembles
//! in input order; nothing shared is mutated.

use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::BufRead;

use crate::config::{DisplayConfig, HintPainter};
use crate::error::{CatalogError, Result};
use crate::nebula::Nebula;
use crate::text::decoder::decode_record;
use crate::text::identifiers::{parse_designator, Designator};
use crate::text::schema::TextSchema;

/// What to do with a record that fails to decode. The decoder reports; the
/// caller decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log the record and continue the batch.
    Skip,
    /// Abort the batch on the first malformed record.
    Abort,
}

/// Outcome of a text ingestion pass.
#[derive(Debug, Default)]
pub struct TextLoadReport {
    /// Records decoded into objects.
    pub decoded: usize,
    /// Errors for records that were skipped, with their line context.
    pub skipped: Vec<CatalogError>,
}

/// Decodes every record in `reader` under the selected schema.
///
/// Blank lines and `#` comments are not records. Malformed records follow
/// `policy`; skipped ones are logged and returned in the report so nothing
/// fails silently. I/O errors always abort the batch.
pub fn load_text<R: BufRead>(
    reader: R,
    schema: &TextSchema,
    policy: MalformedPolicy,
) -> Result<(Vec<Nebula>, TextLoadReport)> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;

    let outcomes: Vec<Option<Result<Nebula>>> = lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| {
            let line = line.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                return None;
            }
            Some(decode_record(line, i + 1, schema))
        })
        .collect();

    let mut objects = Vec::new();
    let mut report = TextLoadReport::default();
    for outcome in outcomes.into_iter().flatten() {
        match outcome {
            Ok(nebula) => objects.push(nebula),
            Err(err) => match policy {
                MalformedPolicy::Abort => return Err(err),
                MalformedPolicy::Skip => {
                    log::warn!("skipping record: {err}");
                    report.skipped.push(err);
                }
            },
        }
    }
    report.decoded = objects.len();
    log::debug!(
        "decoded {} {} records ({} skipped)",
        report.decoded,
        schema.name,
        report.skipped.len()
    );
    Ok((objects, report))
}

/// Name-translation capability supplied by the host application.
pub trait NameTranslator {
    fn translate(&self, english_name: &str) -> Option<String>;
}

impl NameTranslator for HashMap<String, String> {
    fn translate(&self, english_name: &str) -> Option<String> {
        self.get(english_name).cloned()
    }
}

/// Injects localized names, once per object, between ingestion and
/// publication.
pub fn translate_names(objects: &mut [Nebula], translator: &dyn NameTranslator) {
    for nebula in objects.iter_mut() {
        if let Some(localized) = translator.translate(nebula.english_name()) {
            nebula.set_localized_name(localized);
        }
    }
}

/// The published, immutable catalog table with identifier indexes.
pub struct NebulaCatalog {
    objects: Vec<Nebula>,
    by_messier: HashMap<u32, usize>,
    by_ngc: HashMap<u32, usize>,
    by_ic: HashMap<u32, usize>,
    by_pgc: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl NebulaCatalog {
    /// Freezes the loaded objects into a queryable table.
    ///
    /// When two entries claim the same designator, a canonical entry always
    /// shadows a cross-reference entry in the index.
    pub fn publish(objects: Vec<Nebula>) -> Self {
        let mut by_messier = HashMap::new();
        let mut by_ngc = HashMap::new();
        let mut by_ic = HashMap::new();
        let mut by_pgc = HashMap::new();
        let mut by_name = HashMap::new();

        for (idx, nebula) in objects.iter().enumerate() {
            index_number(&mut by_messier, nebula.messier(), idx, &objects);
            index_number(&mut by_ngc, nebula.ngc(), idx, &objects);
            index_number(&mut by_ic, nebula.ic(), idx, &objects);
            index_number(&mut by_pgc, nebula.pgc(), idx, &objects);
            index_name(&mut by_name, nebula.english_name(), idx, &objects);
            if let Some(alt) = nebula.alt_designation() {
                index_name(&mut by_name, alt, idx, &objects);
            }
        }

        Self {
            objects,
            by_messier,
            by_ngc,
            by_ic,
            by_pgc,
            by_name,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nebula> {
        self.objects.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Nebula> {
        self.objects.get(index)
    }

    /// Looks up a designator, resolving duplicate and in-NGC
    /// cross-reference hits to their canonical target. An unknown
    /// designator is a not-found result, not an error.
    pub fn find(&self, designator: &Designator) -> Option<&Nebula> {
        let idx = match designator {
            Designator::Messier(n) => self.by_messier.get(n),
            Designator::Ngc(n) => self.by_ngc.get(n),
            Designator::Ic(n) => self.by_ic.get(n),
            Designator::Pgc(n) => self.by_pgc.get(n),
            Designator::Other(s) => self.by_name.get(&name_key(s)),
        }?;
        Some(self.resolve(*idx))
    }

    /// Looks up by designator string ("M 31", "NGC 224") or plain name
    /// ("Andromeda Galaxy").
    pub fn find_by_name(&self, name: &str) -> Option<&Nebula> {
        self.find(&parse_designator(name))
    }

    /// Hands each visible object's derived quantities to the painter. An
    /// object with unknown magnitude is hinted only when it at least has a
    /// known extent; cross-reference entries are never painted.
    pub fn paint_hints(&self, config: &DisplayConfig, painter: &mut dyn HintPainter) {
        for nebula in &self.objects {
            if nebula.n_type().is_cross_reference() {
                continue;
            }
            let visible = match nebula.mag() {
                Some(mag) => mag <= config.max_hint_magnitude,
                None => nebula.angular_size() > 0.0,
            };
            if visible {
                painter.draw_hint(&nebula.display_quantities(config));
            }
        }
    }

    /// Follows a cross-reference entry to its canonical target via the
    /// entry's own designators. Hands back the entry itself when no
    /// canonical record exists in the table.
    fn resolve(&self, idx: usize) -> &Nebula {
        let entry = &self.objects[idx];
        if !entry.n_type().is_cross_reference() {
            return entry;
        }
        let candidates = [
            self.by_ngc.get(&entry.ngc()),
            self.by_ic.get(&entry.ic()),
            self.by_messier.get(&entry.messier()),
            self.by_pgc.get(&entry.pgc()),
        ];
        for target in candidates.into_iter().flatten() {
            if *target != idx && !self.objects[*target].n_type().is_cross_reference() {
                return &self.objects[*target];
            }
        }
        entry
    }
}

fn index_number(map: &mut HashMap<u32, usize>, key: u32, idx: usize, objects: &[Nebula]) {
    if key == 0 {
        return;
    }
    insert_preferring_canonical(map.entry(key), idx, objects);
}

fn index_name(map: &mut HashMap<String, usize>, name: &str, idx: usize, objects: &[Nebula]) {
    if name.is_empty() {
        return;
    }
    insert_preferring_canonical(map.entry(name_key(name)), idx, objects);
}

fn insert_preferring_canonical<K>(entry: Entry<'_, K, usize>, idx: usize, objects: &[Nebula]) {
    match entry {
        Entry::Vacant(slot) => {
            slot.insert(idx);
        }
        Entry::Occupied(mut slot) => {
            let held_is_reference = objects[*slot.get()].n_type().is_cross_reference();
            if held_is_reference && !objects[idx].n_type().is_cross_reference() {
                slot.insert(idx);
            }
        }
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayQuantities;
    use crate::nebula::NebulaData;
    use crate::types::NebulaType;
    use std::io::Cursor;

    fn object(ngc: u32, name: &str, n_type: NebulaType, mag: Option<f32>) -> Nebula {
        NebulaData {
            ngc,
            english_name: name.to_string(),
            n_type,
            mag,
            angular_size: 0.2,
            xyz: [1.0, 0.0, 0.0],
            orientation_axis: [0.0, 0.0, 1.0],
            in_base_catalog: ngc != 0,
            ..Default::default()
        }
        .build()
    }

    #[test]
    fn test_load_text_skip_policy() {
        let source = "\
# extended revision
224\t\t\tGx\tAnd\t10.68\t41.27
not-a-number\t\t\tGx\tAnd\t10.68\t41.27
598\t\t\tGx\tTri\t23.46\t30.66
";
        let (objects, report) = load_text(
            Cursor::new(source),
            &crate::text::schema::EXTENDED,
            MalformedPolicy::Skip,
        )
        .unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(report.decoded, 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            report.skipped[0],
            CatalogError::MalformedRecord { line: 3, .. }
        ));
    }

    #[test]
    fn test_load_text_abort_policy() {
        let source = "bad\t\t\tGx\tAnd\t10.68\t41.27\n";
        let err = load_text(
            Cursor::new(source),
            &crate::text::schema::EXTENDED,
            MalformedPolicy::Abort,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }));
    }

    #[test]
    fn test_load_text_preserves_input_order() {
        let source = "224\t\t\tGx\tAnd\t10.68\t41.27\n598\t\t\tGx\tTri\t23.46\t30.66\n";
        let (objects, _) = load_text(
            Cursor::new(source),
            &crate::text::schema::EXTENDED,
            MalformedPolicy::Abort,
        )
        .unwrap();
        assert_eq!(objects[0].ngc(), 224);
        assert_eq!(objects[1].ngc(), 598);
    }

    #[test]
    fn test_lookup_and_unresolved_identifier() {
        let catalog = NebulaCatalog::publish(vec![
            object(224, "Andromeda Galaxy", NebulaType::Galaxy, Some(3.4)),
            object(598, "Triangulum Galaxy", NebulaType::Galaxy, Some(5.7)),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(&Designator::Ngc(224)).unwrap().ngc(), 224);
        assert_eq!(catalog.find_by_name("NGC 598").unwrap().ngc(), 598);
        assert_eq!(
            catalog.find_by_name("andromeda galaxy").unwrap().ngc(),
            224
        );
        // not found is a result, not an error
        assert!(catalog.find(&Designator::Ngc(9999)).is_none());
        assert!(catalog.find_by_name("Sombrero Galaxy").is_none());
    }

    #[test]
    fn test_duplicate_resolves_to_canonical() {
        let canonical = object(5194, "Whirlpool Galaxy", NebulaType::Galaxy, Some(8.4));
        let duplicate = NebulaData {
            ngc: 5194,
            ic: 4278,
            n_type: NebulaType::Duplicate,
            mag: Some(8.4),
            angular_size: 0.2,
            xyz: [1.0, 0.0, 0.0],
            orientation_axis: [0.0, 0.0, 1.0],
            ..Default::default()
        }
        .build();

        let catalog = NebulaCatalog::publish(vec![duplicate.clone(), canonical.clone()]);

        // the shared NGC number lands on the canonical entry
        let hit = catalog.find(&Designator::Ngc(5194)).unwrap();
        assert_eq!(hit.n_type(), NebulaType::Galaxy);
        // the duplicate's private IC number also resolves to the canonical
        let via_ic = catalog.find(&Designator::Ic(4278)).unwrap();
        assert_eq!(via_ic.english_name(), "Whirlpool Galaxy");
        // and the reference ranks strictly behind its target
        assert!(duplicate.select_priority() > canonical.select_priority());
    }

    #[test]
    fn test_translate_names() {
        let mut objects = vec![object(224, "Andromeda Galaxy", NebulaType::Galaxy, None)];
        let mut table = HashMap::new();
        table.insert(
            "Andromeda Galaxy".to_string(),
            "Galaxie d'Andromède".to_string(),
        );
        translate_names(&mut objects, &table);
        assert_eq!(objects[0].localized_name(), "Galaxie d'Andromède");
        assert_eq!(objects[0].english_name(), "Andromeda Galaxy");
    }

    struct RecordingPainter(Vec<DisplayQuantities>);

    impl HintPainter for RecordingPainter {
        fn draw_hint(&mut self, quantities: &DisplayQuantities) {
            self.0.push(quantities.clone());
        }
    }

    #[test]
    fn test_paint_hints_filters_references_and_faint_objects() {
        let catalog = NebulaCatalog::publish(vec![
            object(224, "Andromeda Galaxy", NebulaType::Galaxy, Some(3.4)),
            object(0, "Faint smudge", NebulaType::Galaxy, Some(17.0)),
            object(5195, "", NebulaType::Duplicate, Some(8.4)),
        ]);
        let config = DisplayConfig::default();
        let mut painter = RecordingPainter(Vec::new());
        catalog.paint_hints(&config, &mut painter);

        assert_eq!(painter.0.len(), 1);
        assert_eq!(painter.0[0].type_label, "Galaxy");
        assert_eq!(painter.0[0].color, config.galaxy_color);
    }
}
