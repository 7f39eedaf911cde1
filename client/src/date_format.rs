use chrono::NaiveDate;

/// Format an API date string (`YYYY-MM-DD`, optionally with a time suffix)
/// as `dd/mm/yyyy` for display. Unparseable or missing dates fall back to a
/// placeholder rather than leaking raw values into the UI.
pub fn format_date_br(raw: &str) -> String {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => "Data não definida".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_date_br;

    #[test]
    fn formats_plain_date() {
        assert_eq!(format_date_br("2025-03-09"), "09/03/2025");
    }

    #[test]
    fn formats_rfc3339_timestamp() {
        assert_eq!(format_date_br("2025-03-09T00:00:00Z"), "09/03/2025");
    }

    #[test]
    fn empty_or_garbage_yields_placeholder() {
        assert_eq!(format_date_br(""), "Data não definida");
        assert_eq!(format_date_br("not-a-date"), "Data não definida");
    }
}
