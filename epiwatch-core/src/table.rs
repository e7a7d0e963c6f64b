use crate::EpiError;

/// Native shape of a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// One row per entity, one column per date.
    Wide,
    /// One row per (entity, date) pair.
    Long,
}

/// Transient parsed form of one tabular source.
///
/// Exists only between loading and reshaping; it is never retained in the
/// reconciled store.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Name of the source this table came from, used in error messages.
    pub source: String,
    /// Declared shape of the table.
    pub shape: TableShape,
    /// Header row.
    pub headers: Vec<String>,
    /// Data rows; cells align with `headers` positionally.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse CSV bytes into a transient table.
    ///
    /// # Errors
    /// Returns `SourceMalformed` when the header row or a record cannot be
    /// read as CSV.
    pub fn from_csv(source: &str, shape: TableShape, data: &[u8]) -> Result<Self, EpiError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| EpiError::malformed(source, format!("unreadable header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| EpiError::malformed(source, format!("unreadable record: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            source: source.to_string(),
            shape,
            headers,
            rows,
        })
    }

    /// Position of a column by (case-insensitive) name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Position of a required column.
    ///
    /// # Errors
    /// Returns `SourceMalformed` naming the missing column.
    pub fn require_column(&self, name: &str) -> Result<usize, EpiError> {
        self.column(name).ok_or_else(|| {
            EpiError::malformed(&self.source, format!("missing required column \"{name}\""))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_rows() {
        let csv = b"location,date,total_vaccinations\nIndia,2021-01-16,191181\n";
        let table = RawTable::from_csv("owid", TableShape::Long, csv).unwrap();
        assert_eq!(table.headers, vec!["location", "date", "total_vaccinations"]);
        assert_eq!(table.rows, vec![vec!["India", "2021-01-16", "191181"]]);
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let csv = b"Province/State,Country/Region,Lat,Long\n,India,20.59,78.96\n";
        let table = RawTable::from_csv("jhu", TableShape::Wide, csv).unwrap();
        assert_eq!(table.column("country/region"), Some(1));
        assert!(table.require_column("Country/Region").is_ok());
    }

    #[test]
    fn missing_column_is_malformed() {
        let csv = b"a,b\n1,2\n";
        let table = RawTable::from_csv("jhu", TableShape::Wide, csv).unwrap();
        let err = table.require_column("Country/Region").unwrap_err();
        assert!(matches!(err, EpiError::SourceMalformed { source, .. } if source == "jhu"));
    }

    #[test]
    fn tolerates_ragged_rows() {
        let csv = b"a,b,c\n1,2\n";
        let table = RawTable::from_csv("x", TableShape::Long, csv).unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }
}
