use crate::error::Result;
use crate::loader::LoadReport;
use crate::types::RawRecord;

/// Anything that can hand raw records to the projector.
pub trait RecordSource {
    fn load_records(&self) -> Result<LoadReport>;
}

impl RecordSource for Vec<RawRecord> {
    fn load_records(&self) -> Result<LoadReport> {
        Ok(LoadReport { records: self.clone(), diagnostics: Vec::new() })
    }
}
