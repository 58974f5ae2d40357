use crate::error::{Error, Result};

/// An immutable rectangular grid of string cells with named columns.
///
/// Shape invariants hold from construction onward: at least one column, no
/// empty column name, and every row exactly as wide as the header. Duplicate
/// column names are allowed; the database will reject them if it cares.
/// Equality is structural: same columns in the same order, same rows in the
/// same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularData {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularData {
    /// Validates the shape invariants and takes ownership of the grid.
    /// Zero data rows is fine; zero columns is not.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidShape(
                "a table needs at least one column".into(),
            ));
        }
        if let Some(idx) = columns.iter().position(String::is_empty) {
            return Err(Error::InvalidShape(format!(
                "column {idx} has an empty name"
            )));
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidShape(format!(
                    "row {} has {} fields but the header has {} columns",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn construction_keeps_columns_and_rows_in_order() {
        let data = TabularData::new(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3", "4"])],
        )
        .unwrap();

        assert_eq!(data.columns(), &["a", "b"]);
        assert_eq!(data.rows(), &[strings(&["1", "2"]), strings(&["3", "4"])]);
    }

    #[test]
    fn equal_inputs_build_equal_tables() {
        let a = TabularData::new(strings(&["x"]), vec![strings(&["1"])]).unwrap();
        let b = TabularData::new(strings(&["x"]), vec![strings(&["1"])]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_rows_is_valid() {
        let data = TabularData::new(strings(&["a", "b"]), Vec::new()).unwrap();
        assert!(data.rows().is_empty());
    }

    #[test]
    fn zero_columns_is_invalid() {
        let err = TabularData::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }

    #[test]
    fn empty_column_name_is_invalid() {
        let err = TabularData::new(strings(&["a", ""]), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }

    #[test]
    fn ragged_row_is_invalid() {
        let err = TabularData::new(
            strings(&["a", "b", "c"]),
            vec![strings(&["1", "2", "3"]), strings(&["4", "5"])],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }

    #[test]
    fn duplicate_column_names_are_allowed() {
        assert!(TabularData::new(strings(&["a", "a"]), Vec::new()).is_ok());
    }
}
