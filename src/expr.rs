//! Expression evaluation backing the debug console and feedback templates.
//!
//! An expression is whatever text the caller sends; it is run as
//! `SELECT <expr>` on the application database, so it can read (and through
//! sub-selects, enumerate) anything the database holds.

use rusqlite::{Connection, OptionalExtension, types::Value};

use crate::error::{AppError, Result};
use crate::util::format_number;

/// Text form of an evaluated value.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => format_number(*f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => hex::encode(b),
    }
}

/// Evaluate one expression and stringify the first column of the first row.
/// No row at all prints `undefined`.
pub fn evaluate(conn: &Connection, code: &str) -> Result<String> {
    let sql = format!("SELECT {}", code);
    tracing::debug!("Evaluating: {}", sql);
    let value = conn
        .query_row(&sql, [], |row| row.get::<_, Value>(0))
        .optional()?;
    Ok(value
        .as_ref()
        .map(stringify)
        .unwrap_or_else(|| "undefined".to_string()))
}

/// Render `${...}` placeholders in `template` by evaluating their contents.
///
/// Braces inside a placeholder must balance. A backtick anywhere ends the
/// template early, which fails the whole render.
pub fn render_template(conn: &Connection, template: &str) -> Result<String> {
    if template.contains('`') {
        return Err(AppError::BadRequest("Invalid or unexpected token".into()));
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let mut depth = 1usize;
        let mut end = None;
        for (idx, ch) in after.char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(idx);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end = end.ok_or_else(|| AppError::BadRequest("Unterminated template literal".into()))?;
        out.push_str(&evaluate(conn, &after[..end])?);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
