use serde_json::Value;

/// Pretty-print JSON to stdout, falling back to compact form if the
/// pretty printer fails.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{value}"),
    }
}
