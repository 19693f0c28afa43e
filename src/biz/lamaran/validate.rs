use app_error::AppError;
use database_entity::dto::{
  required_field_message, LamaranParams, EMAIL_FIELD, FULL_NAME_FIELD, PHONE_FIELD,
};
use serde_json::{Map, Value};

/// Turns a raw submission body into [LamaranParams].
///
/// A missing body, `null`, anything other than a JSON object, or an object
/// without keys is rejected with [AppError::EmptyBody]. Otherwise every
/// required field is cast to text; all failing fields are reported together,
/// in schema order, as [AppError::SchemaValidation]. Keys outside the schema
/// are dropped.
pub fn validate_lamaran(payload: Option<&Value>) -> Result<LamaranParams, AppError> {
  let document = match payload {
    Some(Value::Object(map)) if !map.is_empty() => map,
    _ => return Err(AppError::EmptyBody),
  };

  let mut messages = Vec::new();
  let mut field = |path: &str| match cast_text(path, document) {
    Ok(value) => value,
    Err(message) => {
      messages.push(message);
      String::new()
    },
  };
  let full_name = field(FULL_NAME_FIELD);
  let email = field(EMAIL_FIELD);
  let phone = field(PHONE_FIELD);

  if messages.is_empty() {
    Ok(LamaranParams::new(full_name, email, phone))
  } else {
    Err(AppError::SchemaValidation(messages))
  }
}

/// Numbers and booleans are accepted in their string form. Arrays and objects
/// cannot be cast.
fn cast_text(path: &str, document: &Map<String, Value>) -> Result<String, String> {
  match document.get(path) {
    None | Some(Value::Null) => Err(required_field_message(path)),
    Some(Value::String(s)) if s.is_empty() => Err(required_field_message(path)),
    Some(Value::String(s)) => Ok(s.clone()),
    Some(Value::Number(n)) => Ok(n.to_string()),
    Some(Value::Bool(b)) => Ok(b.to_string()),
    Some(value @ Value::Array(_)) => Err(cast_failed_message(path, value, "Array")),
    Some(value @ Value::Object(_)) => Err(cast_failed_message(path, value, "Object")),
  }
}

fn cast_failed_message(path: &str, value: &Value, type_name: &str) -> String {
  format!(
    "Cast to string failed for value \"{}\" (type {}) at path \"{}\"",
    inspect(value),
    type_name,
    path
  )
}

/// Renders a value the way it reads in a JavaScript console: single-quoted
/// strings, bare identifier keys and padded brackets, e.g. `{ tags: [ 'a' ] }`.
/// Everything stays on one line.
fn inspect(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => quote(s),
    Value::Array(items) if items.is_empty() => "[]".to_string(),
    Value::Array(items) => {
      let items: Vec<String> = items.iter().map(inspect).collect();
      format!("[ {} ]", items.join(", "))
    },
    Value::Object(map) if map.is_empty() => "{}".to_string(),
    Value::Object(map) => {
      let entries: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}: {}", inspect_key(key), inspect(value)))
        .collect();
      format!("{{ {} }}", entries.join(", "))
    },
  }
}

fn inspect_key(key: &str) -> String {
  let mut chars = key.chars();
  let is_identifier = chars
    .next()
    .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '$')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
  if is_identifier {
    key.to_string()
  } else {
    quote(key)
  }
}

/// Prefers single quotes, then whichever quote the string does not contain.
fn quote(s: &str) -> String {
  let escaped = s.replace('\\', "\\\\");
  match ['\'', '"', '`'].into_iter().find(|q| !s.contains(*q)) {
    Some(q) => format!("{q}{escaped}{q}"),
    None => format!("'{}'", escaped.replace('\'', "\\'")),
  }
}
