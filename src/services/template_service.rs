use std::sync::OnceLock;

use regex::Regex;

use crate::models::lead::Lead;

/// Non-greedy match between braces, so `{a} {b}` yields two references and
/// `{}` yields an (always-missing) empty one. `.` does not cross newlines.
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(.*?)\}").expect("placeholder regex"))
}

/// Every field reference in the template, left to right, duplicates kept.
pub fn referenced_fields(template: &str) -> Vec<&str> {
    placeholder_re()
        .captures_iter(template)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
        .collect()
}

fn is_missing(lead: &Lead, name: &str) -> bool {
    lead.field(name).map_or(true, str::is_empty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    /// Distinct missing field names, in order of first appearance.
    pub missing: Vec<String>,
}

/// Substitutes `{field}` references with the lead's values.
///
/// All-or-nothing: if any referenced field is empty or unknown on the lead,
/// the output is the empty string. A partially merged message is considered
/// worse than no message.
pub fn render(template: &str, lead: &Lead) -> Rendered {
    let refs = referenced_fields(template);

    let mut missing: Vec<String> = Vec::new();
    for name in &refs {
        if is_missing(lead, name) && !missing.iter().any(|m| m == name) {
            missing.push((*name).to_string());
        }
    }
    if !missing.is_empty() {
        return Rendered {
            output: String::new(),
            missing,
        };
    }

    // Each reference replaces the first remaining occurrence of its token,
    // so duplicate references are each substituted exactly once.
    let mut output = template.to_string();
    for name in &refs {
        if let Some(value) = lead.field(name) {
            let token = format!("{{{name}}}");
            output = output.replacen(&token, value, 1);
        }
    }
    Rendered {
        output,
        missing,
    }
}

/// Pre-submit advisory check: for each distinct referenced field, counts how
/// many of the given leads are missing it. Empty references (`{}`) are
/// skipped here, matching the historical client behavior.
pub fn missing_field_report(template: &str, leads: &[Lead]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for name in referenced_fields(template) {
        if !name.is_empty() && !seen.contains(&name) {
            seen.push(name);
        }
    }

    let mut warnings: Vec<String> = Vec::new();
    for name in seen {
        let count = leads.iter().filter(|lead| is_missing(lead, name)).count();
        if count > 0 {
            warnings.push(format!("Field {{{name}}} is missing in {count} leads."));
        }
    }
    if !warnings.is_empty() {
        warnings.push("The message for them will be empty.".to_string());
    }
    warnings
}
