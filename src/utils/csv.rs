use crate::dto::lead_dto::RawLeadRow;

/// Naive lead-CSV parser, kept bug-compatible with the original client-side
/// importer: no quoting or escaping, so values containing commas are not
/// supported. Blank lines are skipped; the first non-blank line is the
/// header; values zip positionally against the header names. Unknown header
/// names are ignored and records with every known field empty are dropped.
pub fn parse_leads_csv(text: &str) -> Vec<RawLeadRow> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(line) => line,
        None => return Vec::new(),
    };
    let keys: Vec<&str> = header.split(',').map(str::trim).collect();

    lines
        .filter_map(|line| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let mut row = RawLeadRow::default();
            for (index, key) in keys.iter().enumerate() {
                let value = values.get(index).copied().unwrap_or("");
                set_field(&mut row, key, value);
            }
            if row.is_empty() {
                None
            } else {
                Some(row)
            }
        })
        .collect()
}

fn set_field(row: &mut RawLeadRow, key: &str, value: &str) {
    let value = Some(value.to_string());
    match key {
        "firstName" => row.first_name = value,
        "lastName" => row.last_name = value,
        "email" => row.email = value,
        "jobTitle" => row.job_title = value,
        "countryCode" => row.country_code = value,
        "companyName" => row.company_name = value,
        "message" => row.message = value,
        "gender" => row.gender = value,
        _ => {}
    }
}

/// Preview partition: a row is importable iff it carries a first name.
pub fn partition_by_first_name(rows: Vec<RawLeadRow>) -> (Vec<RawLeadRow>, Vec<RawLeadRow>) {
    rows.into_iter().partition(RawLeadRow::has_first_name)
}
