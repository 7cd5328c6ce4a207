use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Envelopes with schedule rows emit the rows as records; everything else
/// falls back to two-column field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let rows = map
                .get("result")
                .and_then(|r| r.get("rows"))
                .and_then(Value::as_array);
            if let Some(rows) = rows {
                write_rows(&mut wtr, rows);
            } else {
                let fields = map
                    .get("result")
                    .and_then(Value::as_object)
                    .unwrap_or(map);
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    if val.is_array() {
                        continue;
                    }
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
