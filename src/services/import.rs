//! CSV import
//!
//! Decodes CSV text into validated expenses. The first non-empty line is the
//! header; it must name the `description`, `amount`, `category`, and `date`
//! columns in any order and letter case. Fields are split on commas with no
//! quoting support, so a description can never contain a comma.
//!
//! Rows that fail validation are dropped and decoding continues. Only a header
//! missing a required column aborts the whole import.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Expense, ExpenseDraft, ValidationError};

/// Column names that must be present in the header
pub const REQUIRED_COLUMNS: [&str; 4] = ["description", "amount", "category", "date"];

/// Positions of the required columns within each row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub description: usize,
    pub amount: usize,
    pub category: usize,
    pub date: usize,
}

impl ColumnMapping {
    /// Locate the required columns in a header record
    ///
    /// Names are matched after trimming and lower-casing. Any other column,
    /// including `id`, is ignored. When a name repeats, the last one wins.
    pub fn from_header(header: &StringRecord) -> LedgerResult<Self> {
        let mut found: [Option<usize>; 4] = [None; 4];

        for (idx, name) in header.iter().enumerate() {
            let name = name.trim().to_lowercase();
            if let Some(slot) = REQUIRED_COLUMNS.iter().position(|c| *c == name) {
                found[slot] = Some(idx);
            }
        }

        match found {
            [Some(description), Some(amount), Some(category), Some(date)] => Ok(Self {
                description,
                amount,
                category,
                date,
            }),
            _ => Err(LedgerError::MissingColumns(
                REQUIRED_COLUMNS
                    .iter()
                    .zip(found)
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            )),
        }
    }

    /// Build a draft from a data row; absent trailing fields read as empty
    pub fn draft(&self, record: &StringRecord) -> ExpenseDraft {
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        ExpenseDraft::new(
            field(self.description),
            field(self.amount),
            field(self.category),
            field(self.date),
        )
    }
}

/// A data row that was dropped during decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text
    pub line: u64,
    pub error: ValidationError,
}

/// Outcome of decoding a CSV document
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Accepted expenses in file order
    pub expenses: Vec<Expense>,
    /// Rows dropped by validation
    pub skipped: Vec<SkippedRow>,
    /// Number of accepted rows whose category was coerced to `Other`
    pub coerced_categories: usize,
}

impl ImportResult {
    /// Number of accepted expenses
    pub fn imported(&self) -> usize {
        self.expenses.len()
    }
}

/// Decode CSV text into expenses, silently dropping invalid rows
pub fn decode(text: &str) -> LedgerResult<Vec<Expense>> {
    decode_detailed(text).map(|result| result.expenses)
}

/// Decode CSV text, reporting which rows were dropped and why
pub fn decode_detailed(text: &str) -> LedgerResult<ImportResult> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = reader
        .records()
        .map(|row| row.map_err(|e| LedgerError::Import(format!("Error reading CSV record: {}", e))))
        .filter(|row| !matches!(row, Ok(record) if is_blank(record)));

    let header = match rows.next() {
        Some(header) => header?,
        None => return Err(LedgerError::MissingColumns(missing_all())),
    };
    let mapping = ColumnMapping::from_header(&header)?;

    let mut result = ImportResult::default();
    for row in rows {
        let record = row?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let draft = mapping.draft(&record);

        match draft.validate() {
            Ok(expense) => {
                if Category::resolve(&draft.category).1 {
                    result.coerced_categories += 1;
                }
                result.expenses.push(expense);
            }
            Err(error) => {
                tracing::warn!(line, %error, "Skipping invalid CSV row");
                result.skipped.push(SkippedRow { line, error });
            }
        }
    }

    tracing::debug!(
        imported = result.imported(),
        skipped = result.skipped.len(),
        "Decoded CSV"
    );

    Ok(result)
}

/// A line with nothing but whitespace; delimiter-only lines still count as rows
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(str::is_empty)
}

fn missing_all() -> Vec<String> {
    REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, Money};

    #[test]
    fn test_decode_basic() {
        let csv = "description,amount,category,date\n\
                   Groceries,75.50,Food,2024-07-01\n\
                   Gas,40,Transport,2024-07-03\n";
        let expenses = decode(csv).unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].description(), "Groceries");
        assert_eq!(expenses[0].amount(), Money::from_cents(7550));
        assert_eq!(expenses[0].category(), Category::Food);
        assert_eq!(expenses[1].description(), "Gas");
        assert_eq!(expenses[1].date(), "2024-07-03");
    }

    #[test]
    fn test_header_is_case_insensitive_and_order_independent() {
        let csv = " Date , CATEGORY,Amount,Description\n2024-06-10,Bills,60,Internet Bill\n";
        let expenses = decode(csv).unwrap();

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description(), "Internet Bill");
        assert_eq!(expenses[0].category(), Category::Bills);
        assert_eq!(expenses[0].amount(), Money::from_cents(6000));
    }

    #[test]
    fn test_id_column_is_ignored() {
        let csv = "id,description,amount,category,date\n\
                   550e8400-e29b-41d4-a716-446655440000,Gas,40.00,Transport,2024-07-03\n";
        let expenses = decode(csv).unwrap();

        assert_eq!(expenses.len(), 1);
        assert_ne!(
            expenses[0].id().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_missing_columns() {
        let err = decode("description,amount,date\nGas,40,2024-07-03\n").unwrap_err();
        assert!(matches!(&err, LedgerError::MissingColumns(cols) if cols == &["category"]));

        let err = decode("Gas,40,Transport,2024-07-03\n").unwrap_err();
        assert!(matches!(&err, LedgerError::MissingColumns(cols) if cols.len() == 4));
    }

    #[test]
    fn test_empty_input_is_missing_columns() {
        assert!(matches!(decode(""), Err(LedgerError::MissingColumns(_))));
        assert!(matches!(decode("\n\n  \n"), Err(LedgerError::MissingColumns(_))));
    }

    #[test]
    fn test_delimiter_only_header_is_missing_columns() {
        let err = decode(",,,\ndescription,amount,category,date\nGas,40,Transport,2024-07-03\n")
            .unwrap_err();
        assert!(matches!(&err, LedgerError::MissingColumns(cols) if cols.len() == 4));
    }

    #[test]
    fn test_delimiter_only_row_is_reported() {
        let csv = "description,amount,category,date\nGas,40,Transport,2024-07-03\n,,,\n";
        let result = decode_detailed(csv).unwrap();

        assert_eq!(result.imported(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].line, 3);
        assert_eq!(
            result.skipped[0].error,
            ValidationError::MissingField(Field::Description)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let csv = "description,amount,category,date\n\
                   ,10,Food,2024-07-01\n\
                   Coffee,abc,Food,2024-07-01\n\
                   Refund,-5,Food,2024-07-01\n\
                   Lunch,12,Food,\n\
                   Dinner,30,Food,2024-07-02\n";
        let result = decode_detailed(csv).unwrap();

        assert_eq!(result.imported(), 1);
        assert_eq!(result.expenses[0].description(), "Dinner");
        assert_eq!(result.skipped.len(), 4);
        assert_eq!(result.skipped[0].line, 2);
        assert_eq!(
            result.skipped[0].error,
            ValidationError::MissingField(Field::Description)
        );
        assert!(matches!(
            result.skipped[1].error,
            ValidationError::InvalidAmount(_)
        ));
        assert_eq!(
            result.skipped[3].error,
            ValidationError::MissingField(Field::Date)
        );
    }

    #[test]
    fn test_short_rows_are_dropped_not_fatal() {
        let csv = "description,amount,category,date\nGas,40\nBus,2.75,Transport,2024-07-09\n";
        let expenses = decode(csv).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description(), "Bus");
    }

    #[test]
    fn test_unknown_category_becomes_other() {
        let csv = "description,amount,category,date\nBook,15,Education,2024-07-04\n";
        let result = decode_detailed(csv).unwrap();

        assert_eq!(result.expenses[0].category(), Category::Other);
        assert_eq!(result.coerced_categories, 1);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let csv = "\u{feff}description,amount,category,date\r\n\r\nGas,40,Transport,2024-07-03\r\n\r\n";
        let expenses = decode(csv).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].date(), "2024-07-03");
    }

    #[test]
    fn test_leading_blank_lines_before_header() {
        let csv = "\n\ndescription,amount,category,date\nGas,40,Transport,2024-07-03";
        assert_eq!(decode(csv).unwrap().len(), 1);
    }

    #[test]
    fn test_embedded_comma_shifts_fields() {
        // No quoting support: the extra comma moves "Food" into the amount column
        let csv = "description,amount,category,date\nFish, chips,9.50,Food,2024-07-01\n";
        let result = decode_detailed(csv).unwrap();
        assert_eq!(result.imported(), 0);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_quotes_are_literal() {
        let csv = "description,amount,category,date\n\"Tea\",3,Food,2024-07-01\n";
        let expenses = decode(csv).unwrap();
        assert_eq!(expenses[0].description(), "\"Tea\"");
    }

    #[test]
    fn test_row_order_preserved() {
        let csv = "description,amount,category,date\n\
                   A,1,Food,2024-07-01\n\
                   B,2,Food,2024-06-01\n\
                   C,3,Food,2024-08-01\n";
        let names: Vec<_> = decode(csv)
            .unwrap()
            .iter()
            .map(|e| e.description().to_string())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
