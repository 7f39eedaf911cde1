use crate::roster::{NO_MARKER, RosterEntry};

/// Parse roster records from CSV text. The first line is a header and is
/// discarded; each remaining line is comma-separated
/// `name, habby_id, fase_acesso, fase_ataque` with per-field whitespace
/// trimmed. Missing or empty phase fields default to the negative marker.
/// Rows without a name or habby id are skipped, as are blank lines.
pub fn parse_roster_records(text: &str) -> Vec<RosterEntry> {
    text.lines()
        .skip(1)
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<RosterEntry> {
    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().unwrap_or_default();
    let habby_id = fields.next().unwrap_or_default();
    if name.is_empty() || habby_id.is_empty() {
        return None;
    }
    let access_phase = non_empty_or_negative(fields.next());
    let attack_phase = non_empty_or_negative(fields.next());
    Some(RosterEntry {
        name: name.to_string(),
        habby_id: habby_id.to_string(),
        access_phase,
        attack_phase,
    })
}

fn non_empty_or_negative(field: Option<&str>) -> String {
    match field {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NO_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_roster_records;
    use crate::roster::NO_MARKER;

    #[test]
    fn discards_header_and_parses_rows() {
        let records =
            parse_roster_records("name,habby_id,fase_acesso,fase_ataque\nAna,10,Sim,Não\nBia,20,Sim,Sim\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].habby_id, "10");
        assert_eq!(records[0].access_phase, "Sim");
        assert_eq!(records[0].attack_phase, "Não");
    }

    #[test]
    fn trims_field_whitespace() {
        let records = parse_roster_records("header\n  Ana , 10 , Sim , Sim \n");
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].habby_id, "10");
        assert_eq!(records[0].access_phase, "Sim");
    }

    #[test]
    fn missing_phase_fields_default_to_negative() {
        let records = parse_roster_records("header\nAna,10\nBia,20,Sim\n");
        assert_eq!(records[0].access_phase, NO_MARKER);
        assert_eq!(records[0].attack_phase, NO_MARKER);
        assert_eq!(records[1].access_phase, "Sim");
        assert_eq!(records[1].attack_phase, NO_MARKER);
    }

    #[test]
    fn skips_rows_missing_name_or_id_and_blank_lines() {
        let records = parse_roster_records("header\n,10,Sim,Sim\nAna,,Sim,Sim\n\nBia,20,Sim,Sim\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Bia");
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let records = parse_roster_records("header\r\nAna,10,Sim,Sim\r\nBia,20,Não,Não\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Bia");
    }

    #[test]
    fn header_only_input_yields_nothing() {
        assert!(parse_roster_records("name,habby_id,fase_acesso,fase_ataque\n").is_empty());
        assert!(parse_roster_records("").is_empty());
    }
}
