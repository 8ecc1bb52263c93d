use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::factory::RecordFactory;
use super::loader::{load_lines, LoadReport, ResourceSource};
use super::model::Record;

/// Records that are always available, appended after the external resource.
pub const BUILTIN_SAMPLES: [&str; 16] = [
    "Squirtle,9.0kg,0.5m,0.55,0.35,0.56,Water",
    "Wartortle,22.5kg,1.0m,0.50,0.37,0.60,Water",
    "Blastoise,85.5kg,1.6m,0.83,0.78,0.79,Water",
    "Charmander,8.5kg,0.6m,0.52,0.43,0.39,Fire",
    "Charmeleon,19.0kg,1.1m,0.64,0.58,0.58,Fire",
    "Charizard,90.5kg,1.7m,0.84,0.78,0.78,Fire-Flying",
    "Bulbasaur,6.9kg,0.7m,0.49,0.49,0.45,Grass-Poison",
    "Ivysaur,13.0kg,1.0m,0.62,0.63,0.60,Grass-Poison",
    "Venusaur,100.0kg,2.0m,0.82,0.83,0.80,Grass-Poison",
    "Pikachu,6.0kg,0.4m,0.55,0.40,0.35,Electric",
    "Raichu,30.0kg,0.8m,0.90,0.55,0.60,Electric",
    "Geodude,20.0kg,0.4m,0.80,0.100,0.40,Rock-Ground",
    "Graveler,105.0kg,1.0m,0.95,0.115,0.55,Rock-Ground",
    "Golem,300.0kg,1.4m,1.00,1.00,0.80,Rock-Ground",
    "Magikarp,10.0kg,0.9m,0.29,0.85,0.20,Water",
    "Gyarados,235.0kg,6.5m,1.0,0.79,0.95,Water-Flying",
];

// ---------------------------------------------------------------------------
// RecordStore – the in-memory card collection
// ---------------------------------------------------------------------------

/// Owns the current sequence of records, in load order.
pub struct RecordStore {
    records: Vec<Record>,
    factory: RecordFactory,
    rng: StdRng,
    report: LoadReport,
}

impl RecordStore {
    /// Load `resource` from `source`, append the built-in samples and build
    /// a record for every line that parses.
    pub fn initialize<S: ResourceSource + ?Sized>(source: &S, resource: &str) -> Self {
        let mut store = Self::empty(RecordFactory::new(), StdRng::from_entropy());
        store.reinitialize(source, resource);
        store
    }

    /// Build a store straight from lines, without reading a resource.
    pub fn from_lines<I>(lines: I, factory: RecordFactory, rng: StdRng) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut store = Self::empty(factory, rng);
        store.push_lines(lines);
        store
    }

    /// Rebuild the collection from a new resource.
    ///
    /// The id counter is kept, so records of the new load never reuse an id
    /// handed out earlier in the run.
    pub fn reinitialize<S: ResourceSource + ?Sized>(&mut self, source: &S, resource: &str) {
        let loaded = load_lines(source, resource);
        self.records.clear();
        self.push_lines(
            loaded
                .lines
                .iter()
                .map(String::as_str)
                .chain(BUILTIN_SAMPLES.iter().copied()),
        );
        self.report = loaded.report;
        log::info!("Record store holds {} records", self.records.len());
    }

    fn empty(factory: RecordFactory, rng: StdRng) -> Self {
        RecordStore {
            records: Vec::new(),
            factory,
            rng,
            report: LoadReport::default(),
        }
    }

    fn push_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            match self.factory.parse_record(line) {
                Ok(record) => self.records.push(record),
                Err(e) => log::warn!("Error parsing Pokemon data {line:?}: {e}"),
            }
        }
    }

    /// Copy of every record in store order.
    pub fn all(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// A uniformly chosen record, or `None` when the store is empty.
    pub fn random(&mut self) -> Option<&Record> {
        self.records.choose(&mut self.rng)
    }

    /// First record whose name equals `name`, ignoring case.
    pub fn search(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name_matches(name))
    }

    /// Remove every record whose name equals `name`, ignoring case.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !r.name_matches(name));
        let removed = before - self.records.len();
        if removed > 0 {
            log::info!("Removed {removed} record(s) named {name:?}");
        }
        removed > 0
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Diagnostics of the load that built the current collection.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_text, DirResources, MemoryResources};
    use proptest::prelude::*;

    fn seeded(lines: &[&str]) -> RecordStore {
        RecordStore::from_lines(
            lines.iter().copied(),
            RecordFactory::new(),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn test_initialize_with_missing_resource_uses_samples() {
        let store = RecordStore::initialize(&MemoryResources::new(), "pokemon_list.csv");

        assert_eq!(store.count(), BUILTIN_SAMPLES.len());
        assert!(store.report().resource_missing);
        let ids: Vec<u32> = store.all().iter().map(Record::id).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<u32>>());
    }

    #[test]
    fn test_bundled_list_loads_cleanly() {
        let assets = DirResources::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
        let store = RecordStore::initialize(&assets, "pokemon_list.csv");

        let report = store.report();
        assert!(!report.resource_missing);
        assert_eq!(report.skipped_lines, 0);
        assert_eq!(store.count(), report.valid_lines() + BUILTIN_SAMPLES.len());
        assert_eq!(store.all()[0].name(), "Caterpie");
    }

    #[test]
    fn test_initialize_puts_external_lines_first() {
        let source = MemoryResources::new().with(
            "list.csv",
            "Mew,4.0kg,0.4m,1.0,1.0,1.0,Psychic\n\
             not a record\n\
             \"Eevee,6.5kg,0.3m,0.55,0.50,0.55,Normal\",\n",
        );
        let store = RecordStore::initialize(&source, "list.csv");

        // count equals the valid lines of external + built-in input
        assert_eq!(store.count(), 2 + BUILTIN_SAMPLES.len());
        assert_eq!(store.report().valid_lines(), 2);
        assert_eq!(store.report().skipped_details, vec!["Line 2: not a record".to_string()]);

        let all = store.all();
        assert_eq!(all[0].name(), "Mew");
        assert_eq!(all[1].name(), "Eevee");
        assert_eq!(all[2].name(), "Squirtle");
        assert!(all.iter().all(|r| r.name() != "not a record"));
    }

    #[test]
    fn test_from_lines_skips_unparseable_lines() {
        let store = seeded(&[
            "Squirtle,9.0kg,0.5m,0.55,0.35,0.56,Water",
            "Squirtle,9.0kg,0.5m",
            "Pikachu,6.0kg,0.4m,0.55,0.40,0.35,Electric",
        ]);
        assert_eq!(store.count(), 2);
        assert_eq!(store.all()[1].id(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = seeded(&BUILTIN_SAMPLES);
        let lower = store.search("charizard").unwrap();
        let upper = store.search("CHARIZARD").unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.name(), "Charizard");
        assert!(store.search("Missingno").is_none());
    }

    #[test]
    fn test_search_returns_first_match() {
        let store = seeded(&[
            "Ditto,4.0kg,0.3m,0.48,0.48,0.48,Normal",
            "DITTO,4.0kg,0.3m,0.50,0.50,0.50,Normal",
        ]);
        assert_eq!(store.search("ditto").unwrap().id(), 1);
    }

    #[test]
    fn test_remove_then_remove_again() {
        let mut store = seeded(&BUILTIN_SAMPLES);
        let before = store.count();

        assert!(store.remove("pikachu"));
        assert_eq!(store.count(), before - 1);
        assert!(!store.remove("pikachu"));
        assert_eq!(store.count(), before - 1);
        assert!(store.search("Pikachu").is_none());
    }

    #[test]
    fn test_remove_drops_all_duplicates_and_keeps_order() {
        let mut store = seeded(&[
            "Ditto,4.0kg,0.3m,0.48,0.48,0.48,Normal",
            "Mew,4.0kg,0.4m,1.0,1.0,1.0,Psychic",
            "ditto,4.0kg,0.3m,0.50,0.50,0.50,Normal",
            "Eevee,6.5kg,0.3m,0.55,0.50,0.55,Normal",
        ]);

        assert!(store.remove("DITTO"));
        let names: Vec<String> = store.all().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Mew".to_string(), "Eevee".to_string()]);
        let ids: Vec<u32> = store.all().iter().map(Record::id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_all_is_a_copy() {
        let mut store = seeded(&BUILTIN_SAMPLES);
        let mut snapshot = store.all();
        snapshot.clear();
        assert_eq!(store.count(), BUILTIN_SAMPLES.len());

        let snapshot = store.all();
        store.remove("Squirtle");
        assert_eq!(snapshot.len(), BUILTIN_SAMPLES.len());
    }

    #[test]
    fn test_random_on_empty_store_is_none() {
        let mut store = seeded(&[]);
        assert!(store.is_empty());
        assert!(store.random().is_none());
    }

    #[test]
    fn test_random_picks_from_store() {
        let mut store = seeded(&BUILTIN_SAMPLES);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let record = store.random().unwrap();
            assert!(record.id() >= 1 && record.id() <= 16);
            seen.insert(record.id());
        }
        // with replacement, 200 draws over 16 records reach most of them
        assert!(seen.len() > 8);
    }

    #[test]
    fn test_reinitialize_keeps_ids_unique() {
        let mut store = RecordStore::initialize(&MemoryResources::new(), "missing.csv");
        let max_before = store.all().iter().map(Record::id).max().unwrap();

        let source = MemoryResources::new().with("new.csv", "Mew,4.0kg,0.4m,1.0,1.0,1.0,Psychic\n");
        store.reinitialize(&source, "new.csv");

        assert_eq!(store.count(), 1 + BUILTIN_SAMPLES.len());
        assert!(store.all().iter().all(|r| r.id() > max_before));
        assert!(!store.report().resource_missing);
        assert_eq!(store.search("mew").unwrap().id(), max_before + 1);
    }

    /// `(line, valid)`: a well-formed record line, or one with a field
    /// dropped or a stat that is not a number.
    fn generated_line() -> impl Strategy<Value = (String, bool)> {
        (
            "[A-Z][a-z]{1,10}",
            1u32..5000,
            1u32..100,
            0u32..200,
            0usize..3,
        )
            .prop_map(|(name, weight, height, stat, shape)| {
                let (weight, height, stat) =
                    (weight as f64 / 10.0, height as f64 / 10.0, stat as f64 / 100.0);
                match shape {
                    0 => (format!("{name},{weight}kg,{height}m,{stat},{stat},{stat},Water"), true),
                    1 => (format!("{name},{weight}kg,{height}m,{stat},{stat},Water"), false),
                    _ => (format!("{name},{weight}kg,{height}m,{stat},tough,{stat},Water"), false),
                }
            })
    }

    proptest! {
        #[test]
        fn prop_count_equals_valid_lines(
            lines in prop::collection::vec(generated_line(), 0..40)
        ) {
            let text = lines.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>().join("\n");
            let loaded = load_text(&text);
            let store = RecordStore::from_lines(
                loaded.lines.iter(),
                RecordFactory::new(),
                StdRng::seed_from_u64(3),
            );

            let valid = lines.iter().filter(|(_, ok)| *ok).count();
            prop_assert_eq!(store.count(), loaded.report.valid_lines());
            prop_assert_eq!(store.count(), valid);
            let ids: Vec<u32> = store.all().iter().map(Record::id).collect();
            prop_assert_eq!(ids, (1..=valid as u32).collect::<Vec<u32>>());
        }
    }
}
