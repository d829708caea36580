//! Compiles a [`Predicate`] into a SQL `WHERE` expression with positional
//! parameters.

use roster_core::query::{Predicate, TextColumn};
use rusqlite::types::Value;

/// A `WHERE` expression and its parameters, in placeholder order.
#[derive(Debug)]
pub struct Compiled {
  pub sql:    String,
  pub params: Vec<Value>,
}

pub fn compile(predicate: &Predicate) -> Compiled {
  let mut params = Vec::new();
  let sql = write(predicate, &mut params);
  Compiled { sql, params }
}

fn column_name(column: TextColumn) -> &'static str {
  match column {
    TextColumn::FirstName => "first_name",
    TextColumn::LastName => "last_name",
    TextColumn::Email => "email",
    TextColumn::Phone => "phone",
    TextColumn::AdditionalInfo => "additional_info",
  }
}

/// `%needle%` with LIKE metacharacters escaped by `\`.
fn like_pattern(needle: &str) -> String {
  let mut pattern = String::with_capacity(needle.len() + 2);
  pattern.push('%');
  for ch in needle.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

fn write(predicate: &Predicate, params: &mut Vec<Value>) -> String {
  match predicate {
    Predicate::Always => "1".to_owned(),
    Predicate::IdEq(id) => {
      params.push(Value::Integer(*id));
      "id = ?".to_owned()
    }
    Predicate::TextEq { column, value } => {
      params.push(Value::Text(value.clone()));
      format!("{} = ?", column_name(*column))
    }
    // SQLite's LIKE ignores ASCII case.
    Predicate::Contains { column, needle } => {
      params.push(Value::Text(like_pattern(needle)));
      format!("{} LIKE ? ESCAPE '\\'", column_name(*column))
    }
    Predicate::BirthdayBetween { from, to } => {
      params.push(Value::Integer(from.key()));
      params.push(Value::Integer(to.key()));
      "birthday_md BETWEEN ? AND ?".to_owned()
    }
    Predicate::And(parts) => join(parts, " AND ", "1", params),
    Predicate::Or(parts) => join(parts, " OR ", "0", params),
  }
}

fn join(parts: &[Predicate], op: &str, empty: &str, params: &mut Vec<Value>) -> String {
  if parts.is_empty() {
    return empty.to_owned();
  }
  let sql: Vec<String> = parts.iter().map(|p| write(p, params)).collect();
  format!("({})", sql.join(op))
}
