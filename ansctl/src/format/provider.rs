//! Binding between a set of records and their rendering rules

use ans_core::{FieldSet, Fields};

type Extractor<T> = Box<dyn Fn(&T) -> FieldSet>;

/// Records plus the rules to turn them into rows.
///
/// Built once per command and dropped after output. When an extractor is set
/// its field sets are used verbatim, default flags included; otherwise
/// [`Fields::fields`] is used and the default columns decide visibility.
pub struct Provider<T> {
    records: Vec<T>,
    default_columns: Vec<&'static str>,
    extractor: Option<Extractor<T>>,
}

impl<T: Fields> Provider<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            default_columns: T::DEFAULT_COLUMNS.to_vec(),
            extractor: None,
        }
    }

    pub fn single(record: T) -> Self {
        Self::new(vec![record])
    }

    pub fn with_default_columns(mut self, columns: &[&'static str]) -> Self {
        self.default_columns = columns.to_vec();
        self
    }

    pub fn with_extractor(mut self, extractor: impl Fn(&T) -> FieldSet + 'static) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn default_columns(&self) -> &[&'static str] {
        &self.default_columns
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One field set per record, in record order.
    pub fn field_sets(&self) -> Vec<FieldSet> {
        self.records
            .iter()
            .map(|record| match &self.extractor {
                Some(extract) => extract(record),
                None => {
                    let mut set = record.fields();
                    set.mark_defaults(&self.default_columns);
                    set
                }
            })
            .collect()
    }
}
