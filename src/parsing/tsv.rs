use std::path::Path;

use crate::core::operation::Operation;
use crate::parsing::ParseError;
use crate::utils::validation::MAX_QUERY_OPERATIONS;

/// Parse a TSV/CSV file with columns: `operation_name`, `machine_name`, [`sequence_number`]
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_tsv_file(path: &Path, delimiter: char) -> Result<Vec<Operation>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_tsv_text(&content, delimiter)
}

/// Parse TSV/CSV text with columns: `operation_name`, `machine_name`, [`sequence_number`]
///
/// Rows without a sequence number take their 1-based position among data rows.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields,
/// contain an invalid sequence number, or no operations are found, or
/// `ParseError::TooManyOperations` if the limit is exceeded.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<Vec<Operation>, ParseError> {
    let mut operations = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if first == "operation_name" || first == "operation" || first == "operation name" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        if operations.len() >= MAX_QUERY_OPERATIONS {
            return Err(ParseError::TooManyOperations(operations.len() + 1));
        }

        let sequence_number = match fields.get(2).map(|s| s.trim()) {
            Some(raw) if !raw.is_empty() => raw.parse().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid sequence number on line {line_num}: '{raw}'"
                ))
            })?,
            _ => u32::try_from(operations.len() + 1).map_err(|_| {
                ParseError::TooManyOperations(operations.len() + 1)
            })?,
        };

        operations.push(Operation::new(
            fields[0].trim(),
            fields[1].trim(),
            sequence_number,
        ));
    }

    if operations.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No operations found in file".to_string(),
        ));
    }

    Ok(operations)
}
