pub fn get_env_var(key: &str, default: &str) -> String {
  std::env::var(key).unwrap_or_else(|e| {
    tracing::debug!(
      "failed to read environment variable:{}:{}, using default value: {}",
      e,
      key,
      default
    );
    default.to_owned()
  })
}

/// Optionally get an environment variable.
/// if value is empty, return None.
pub fn get_env_var_opt(key: &str) -> Option<String> {
  match std::env::var(key) {
    Ok(val) => {
      if val.is_empty() {
        None
      } else {
        Some(val)
      }
    },
    Err(e) => {
      tracing::trace!("failed to read environment variable: {}:{}, None set", key, e);
      None
    },
  }
}

/// Returns the first non-empty value among `keys`, or `default`.
pub fn get_first_env_var(keys: &[&str], default: &str) -> String {
  keys
    .iter()
    .find_map(|key| get_env_var_opt(key))
    .unwrap_or_else(|| default.to_owned())
}

/// Splits a comma separated value, dropping blank entries.
pub fn split_env_list(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(ToOwned::to_owned)
    .collect()
}
