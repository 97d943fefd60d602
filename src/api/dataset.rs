use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::{Equivalent, IndexMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Point, ValueDomain, start_of_day};
use crate::error::{ChartError, ChartResult};

const DATE_COLUMN: &str = "dt";
const RESULT_COLUMN: &str = "result";

/// One parsed CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub date_time: NaiveDateTime,
    /// NaN when the cell is empty or not numeric.
    pub result: f64,
    /// Remaining columns, in header order.
    #[serde(default)]
    pub columns: IndexMap<String, String>,
}

impl DatasetRecord {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(String::as_str)
    }

    /// Numeric value of `name`; `result` reads the parsed result.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        if name == RESULT_COLUMN {
            return Some(self.result);
        }
        self.column(name).map(parse_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetKey {
    pub site_id: String,
    pub data_type: String,
}

impl DatasetKey {
    #[must_use]
    pub fn new(site_id: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            data_type: data_type.into(),
        }
    }
}

/// Borrowed lookup form of [`DatasetKey`]; hashes the same fields in the same order.
#[derive(Hash)]
struct DatasetKeyRef<'a> {
    site_id: &'a str,
    data_type: &'a str,
}

impl Equivalent<DatasetKey> for DatasetKeyRef<'_> {
    fn equivalent(&self, key: &DatasetKey) -> bool {
        self.site_id == key.site_id && self.data_type == key.data_type
    }
}

/// Which record columns feed a [`Point`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointColumns {
    pub value: String,
    #[serde(default)]
    pub value_min: Option<String>,
    #[serde(default)]
    pub value_max: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

impl Default for PointColumns {
    fn default() -> Self {
        Self {
            value: RESULT_COLUMN.to_owned(),
            value_min: None,
            value_max: None,
            class: None,
        }
    }
}

impl PointColumns {
    #[must_use]
    pub fn with_range(
        mut self,
        value_min: impl Into<String>,
        value_max: impl Into<String>,
    ) -> Self {
        self.value_min = Some(value_min.into());
        self.value_max = Some(value_max.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// All rows fetched for one site and data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub key: DatasetKey,
    pub values: Vec<DatasetRecord>,
}

impl Dataset {
    #[must_use]
    pub fn new(key: DatasetKey, values: Vec<DatasetRecord>) -> Self {
        Self { key, values }
    }

    /// Site id followed by data type, as used by the upstream bucket layout.
    #[must_use]
    pub fn dataset_id(&self) -> String {
        format!("{}{}", self.key.site_id, self.key.data_type)
    }

    /// `[min, max]` of finite results, or `None` when none remain.
    #[must_use]
    pub fn result_domain(&self) -> Option<ValueDomain> {
        ValueDomain::from_values(self.values.iter().map(|record| record.result))
    }

    /// Maps rows to points with ids `"{site}-{date}"`.
    ///
    /// Missing or malformed cells become NaN so segment construction can drop
    /// them.
    #[must_use]
    pub fn to_points(&self, columns: &PointColumns) -> Vec<Point> {
        self.values
            .iter()
            .map(|record| {
                let id = format!(
                    "{}-{}",
                    self.key.site_id,
                    record.date_time.format("%Y-%m-%d")
                );
                let value = record.number(&columns.value).unwrap_or(f64::NAN);
                let mut point = Point::new(id, record.date_time, value);
                point.value_min = columns
                    .value_min
                    .as_deref()
                    .map(|name| record.number(name).unwrap_or(f64::NAN));
                point.value_max = columns
                    .value_max
                    .as_deref()
                    .map(|name| record.number(name).unwrap_or(f64::NAN));
                point.class = columns
                    .class
                    .as_deref()
                    .and_then(|name| record.column(name))
                    .filter(|class| !class.is_empty())
                    .map(str::to_owned);
                point
            })
            .collect()
    }
}

fn parse_number(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_date_time(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .map(start_of_day)
        .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Parses a site CSV with a `dt` column and an optional `result` column.
///
/// Rows whose date cannot be parsed are skipped with a warning.
pub fn parse_dataset_csv<R: Read>(key: DatasetKey, reader: R) -> ChartResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    let date_index = headers
        .iter()
        .position(|header| header == DATE_COLUMN)
        .ok_or_else(|| ChartError::Csv(format!("missing `{DATE_COLUMN}` column")))?;
    let result_index = headers.iter().position(|header| header == RESULT_COLUMN);

    let mut values = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let Some(date_time) = record.get(date_index).and_then(parse_date_time) else {
            skipped += 1;
            continue;
        };
        let result = result_index
            .and_then(|index| record.get(index))
            .map_or(f64::NAN, parse_number);
        let columns = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != date_index && Some(*index) != result_index)
            .filter_map(|(index, header)| {
                record
                    .get(index)
                    .map(|cell| (header.clone(), cell.to_owned()))
            })
            .collect();
        values.push(DatasetRecord {
            date_time,
            result,
            columns,
        });
    }

    if skipped > 0 {
        warn!(
            site_id = %key.site_id,
            data_type = %key.data_type,
            skipped,
            "skipped csv rows with unparseable dates"
        );
    }
    Ok(Dataset::new(key, values))
}

/// Bounded dataset cache keyed by site and data type.
///
/// Re-inserting a key replaces it and makes it the newest entry. Inserts past
/// capacity evict the oldest entry.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    capacity: usize,
    datasets: IndexMap<DatasetKey, Dataset>,
}

impl DatasetStore {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            datasets: IndexMap::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Stores `dataset`, returning the evicted oldest entry if any.
    pub fn insert(&mut self, dataset: Dataset) -> Option<Dataset> {
        let key = dataset.key.clone();
        self.datasets.shift_remove(&key);

        let evicted = if self.datasets.len() >= self.capacity {
            self.datasets.shift_remove_index(0).map(|(_, evicted)| evicted)
        } else {
            None
        };
        if let Some(evicted) = &evicted {
            debug!(
                site_id = %evicted.key.site_id,
                data_type = %evicted.key.data_type,
                "dataset evicted"
            );
        }

        debug!(
            site_id = %key.site_id,
            data_type = %key.data_type,
            rows = dataset.values.len(),
            "dataset stored"
        );
        self.datasets.insert(key, dataset);
        evicted
    }

    #[must_use]
    pub fn dataset(&self, site_id: &str, data_type: &str) -> Option<&Dataset> {
        self.datasets.get(&DatasetKeyRef { site_id, data_type })
    }

    pub fn datasets_for_site<'a>(
        &'a self,
        site_id: &'a str,
    ) -> impl Iterator<Item = &'a Dataset> + 'a {
        self.datasets
            .values()
            .filter(move |dataset| dataset.key.site_id == site_id)
    }

    #[must_use]
    pub fn result_domain(&self, site_id: &str, data_type: &str) -> Option<ValueDomain> {
        self.dataset(site_id, data_type)
            .and_then(Dataset::result_domain)
    }

    pub fn clear(&mut self) {
        self.datasets.clear();
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new(32)
    }
}
