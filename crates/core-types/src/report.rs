use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A single scalar value in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    Text(String),
}

impl Cell {
    /// `true` for values that should be right-aligned in a table.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Integer(_) | Cell::Decimal(_))
    }
}

/// Formats the value for display.
///
/// Integers and the integer part of decimals get thousands separators. Decimals
/// keep the scale the store returned them with, so a value rounded to two places
/// prints as `11.00`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(value) => f.write_str(&group_thousands(&value.to_string())),
            Cell::Decimal(value) => f.write_str(&group_thousands(&value.to_string())),
            Cell::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Decimal(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// Inserts `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(number.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// One row of a report: column names mapped to values, in select-list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "serde_map::OrderedMap")]
pub struct ReportRow {
    cells: Vec<(String, Cell)>,
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Builder-style so model conversions read as a list.
    pub fn with(mut self, column: &str, value: impl Into<Cell>) -> Self {
        self.cells.push((column.to_string(), value.into()));
        self
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

mod serde_map {
    use super::{Cell, ReportRow};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    /// Serializes a row as a JSON object whose keys keep column order.
    pub struct OrderedMap(Vec<(String, Cell)>);

    impl From<ReportRow> for OrderedMap {
        fn from(row: ReportRow) -> Self {
            OrderedMap(row.cells)
        }
    }

    impl Serialize for OrderedMap {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (column, cell) in &self.0 {
                map.serialize_entry(column, cell)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn integers_are_grouped() {
        assert_eq!(Cell::Integer(7).to_string(), "7");
        assert_eq!(Cell::Integer(1234).to_string(), "1,234");
        assert_eq!(Cell::Integer(1234567).to_string(), "1,234,567");
        assert_eq!(Cell::Integer(-987654).to_string(), "-987,654");
    }

    #[test]
    fn decimals_keep_their_scale() {
        assert_eq!(Cell::Decimal(dec!(11.00)).to_string(), "11.00");
        assert_eq!(Cell::Decimal(dec!(-2.5)).to_string(), "-2.5");
        assert_eq!(Cell::Decimal(dec!(48213577)).to_string(), "48,213,577");
        assert_eq!(Cell::Decimal(dec!(1234.5678)).to_string(), "1,234.5678");
    }

    #[test]
    fn dates_and_nulls() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(Cell::Date(date).to_string(), "2024-03-05");
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::from(None::<Decimal>), Cell::Null);
    }

    #[test]
    fn row_keeps_column_order() {
        let row = ReportRow::new()
            .with("ticker", "XYZ")
            .with("row_count", 3i64)
            .with("avg_close_price", dec!(11.00));

        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["ticker", "row_count", "avg_close_price"]
        );
        assert_eq!(row.get("ticker"), Some(&Cell::Text("XYZ".to_string())));
        assert_eq!(row.get("missing"), None);
        assert!(row.get("row_count").is_some_and(Cell::is_numeric));
    }
}
