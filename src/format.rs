//! pt-BR display formatting.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

const MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro", "Outubro",
    "Novembro", "Dezembro",
];

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// `dd/mm/yyyy` in the timestamp's own timezone.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy HH:MM`
pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// `HH:MM`
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%H:%M").to_string()
}

/// Portuguese month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn brl_groups_thousands_and_rounds_cents() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(5.5), "R$ 5,50");
        assert_eq!(format_brl(1234.567), "R$ 1.234,57");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-42.1), "-R$ 42,10");
    }

    #[test]
    fn dates_use_day_first() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_date(&at), "07/03/2024");
        assert_eq!(format_date_time(&at), "07/03/2024 09:05");
        assert_eq!(format_time(&at), "09:05");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), Some("Janeiro"));
        assert_eq!(month_name(3), Some("Março"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
