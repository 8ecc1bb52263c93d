use super::error::LoadError;
use super::loader::parse_fields;
use super::model::{Record, RecordFields};

/// Builds records and hands out their sequential ids.
///
/// Ids start at 1 and only advance when a record is actually created, so a
/// rejected line never burns an id.
#[derive(Debug)]
pub struct RecordFactory {
    next_id: u32,
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl RecordFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, fields: RecordFields) -> Record {
        let record = Record::new(self.next_id, fields);
        self.next_id += 1;
        record
    }

    /// Parse a cleaned line into a record with the next id.
    pub fn parse_record(&mut self, line: &str) -> Result<Record, LoadError> {
        let fields = parse_fields(line)?;
        log::debug!("Parsed record {} ({})", fields.name, fields.category);
        Ok(self.create(fields))
    }

    /// Number of records created so far.
    pub fn issued(&self) -> u32 {
        self.next_id - 1
    }
}
