/// Removes C0 control characters and DEL from `s`, leaving tab, newline
/// and carriage return in place.
pub fn strip_control_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_nul_bell_and_del() {
        let input = "{\"bodyPreview\": \"Hi\x00 team\x07\x7f\"}";
        assert_eq!(strip_control_chars(input), "{\"bodyPreview\": \"Hi team\"}");
    }

    #[test]
    fn keeps_json_whitespace() {
        let input = "{\n\t\"value\": []\r\n}";
        assert_eq!(strip_control_chars(input), input);
    }

    #[test]
    fn stripped_payload_parses() {
        let input = "{\"subject\": \"Invoice\x1b 42\"}";
        let v: serde_json::Value = serde_json::from_str(&strip_control_chars(input)).unwrap();
        assert_eq!(v["subject"], "Invoice 42");
    }

    #[test]
    fn keeps_non_ascii_text() {
        let input = "Entwurf für Zoë — 日本語";
        assert_eq!(strip_control_chars(input), input);
    }
}
