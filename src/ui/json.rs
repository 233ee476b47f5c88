use std::io::{self, Write};

use serde_json::Value;

/// Write `event` as one NDJSON line and flush.
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    out.flush()
}

pub fn emit(event: &Value) -> io::Result<()> {
    write_event(&mut io::stdout().lock(), event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_newline_terminated() {
        let mut out = Vec::new();
        write_event(&mut out, &serde_json::json!({"event": "error", "message": "x"})).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"event\":\"error\",\"message\":\"x\"}\n"
        );
    }
}
