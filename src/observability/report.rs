//! Result printing.

use serde::Serialize;

/// Print `value` as pretty JSON on stdout, prefixed by `label`.
pub fn print_json<T: Serialize + ?Sized>(label: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{} {}", label, rendered),
        Err(e) => tracing::warn!(label = label, error = %e, "Failed to render result"),
    }
}
