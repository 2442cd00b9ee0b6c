use ops_handlers_core::record::Record;

/// Single-table key-value store addressed by employee id.
pub trait RecordStore {
    fn get_record(&self, employee_id: &str) -> Result<Option<Record>, String>;

    /// Unconditional put; an existing record with the same id is replaced.
    fn put_record(&self, record: &Record) -> Result<(), String>;
}
