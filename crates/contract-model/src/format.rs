//! French locale formatting of amounts, percentages and dates

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Narrow no-break space, used to group digits
pub const GROUP_SEPARATOR: char = '\u{202f}';
/// No-break space, used before units
pub const NBSP: char = '\u{a0}';

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

fn group_digits(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(&GROUP_SEPARATOR.to_string())
}

/// Format a number with two decimals, a comma and grouped thousands
pub fn format_decimal(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, group_digits(cents / 100), cents % 100)
}

/// Format an amount in euros, e.g. `1 234,50 €`
pub fn format_currency(value: f64) -> String {
    format!("{}{}€", format_decimal(value), NBSP)
}

/// Format a percentage with two decimals, e.g. `12,50 %`
pub fn format_percent(value: f64) -> String {
    format!("{}{}%", format_decimal(value), NBSP)
}

/// Format a quantity without superfluous decimals, e.g. `3` or `2,5`
pub fn format_quantity(value: f64) -> String {
    let text = format_decimal(value);
    let text = text.trim_end_matches('0').trim_end_matches(',');
    match text {
        "" | "-" => "0".to_owned(),
        text => text.to_owned(),
    }
}

/// Format a surface, e.g. `120 m²`
pub fn format_surface(value: f64) -> String {
    format!("{}{}m²", format_quantity(value), NBSP)
}

/// Parse the date formats found in the records
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.date_naive());
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date_time.date());
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

/// Format a date in long French form (`15 mars 2024`)
pub fn format_naive_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Format a stored date, keeping the raw text when it can't be parsed
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format_naive_date(date),
        None => {
            log::debug!("Keeping unparseable date {:?}", raw);
            raw.to_owned()
        }
    }
}

/// Turn a clause key into a title: underscores become spaces and
/// every word starts with a capital letter
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency() {
        assert_eq!(format_currency(1234.5), "1\u{202f}234,50\u{a0}€");
        assert_eq!(format_currency(0.0), "0,00\u{a0}€");
        assert_eq!(format_currency(-50.0), "-50,00\u{a0}€");
        assert_eq!(
            format_currency(1_000_000.004),
            "1\u{202f}000\u{202f}000,00\u{a0}€"
        );
        assert_eq!(format_currency(-0.001), "0,00\u{a0}€");
    }

    #[test]
    fn percent_and_quantity() {
        assert_eq!(format_percent(12.5), "12,50\u{a0}%");
        assert_eq!(format_percent(33.333), "33,33\u{a0}%");
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2,5");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_surface(120.0), "120\u{a0}m²");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2024-03-15"), "15 mars 2024");
        assert_eq!(format_date("2024-08-01T10:00:00+02:00"), "1 août 2024");
        assert_eq!(format_date("2024-12-24T08:30:00.000"), "24 décembre 2024");
        assert_eq!(format_date("05/02/2023"), "5 février 2023");
        assert_eq!(format_date("bientôt"), "bientôt");
    }

    #[test]
    fn clause_titles() {
        assert_eq!(humanize_key("conditions_de_paiement"), "Conditions De Paiement");
        assert_eq!(humanize_key("resiliation"), "Resiliation");
        assert_eq!(humanize_key("_propriete__intellectuelle"), "Propriete Intellectuelle");
    }
}
