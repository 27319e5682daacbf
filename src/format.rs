//! Display helpers with explicit locale and civil zone.
//!
//! Nothing here reads the system locale or timezone.

use crate::config::{CivilZone, DisplayLocale, MonitorConfig};
use crate::constants::display::{
    ABSENT_DATE_PLACEHOLDER, COMPANY_PLACEHOLDER, UNTITLED_ROLE_PLACEHOLDER,
};
use crate::data::JobRecord;
use crate::dates::CanonicalInstant;
use crate::types::DisplayText;

/// Civil date of `instant` in `zone`, laid out for `locale`; `—` when absent.
pub fn format_date(instant: CanonicalInstant, zone: CivilZone, locale: DisplayLocale) -> DisplayText {
    let Some(instant) = instant.get() else {
        return ABSENT_DATE_PLACEHOLDER.to_string();
    };
    let civil = instant.with_timezone(&zone.offset());
    let pattern = match locale {
        DisplayLocale::EnGb => "%d/%m/%Y",
        DisplayLocale::EnUs => "%m/%d/%Y",
        DisplayLocale::Iso => "%Y-%m-%d",
    };
    civil.format(pattern).to_string()
}

/// Civil date and time of `instant` in `zone`, laid out for `locale`; `—` when absent.
pub fn format_date_time(
    instant: CanonicalInstant,
    zone: CivilZone,
    locale: DisplayLocale,
) -> DisplayText {
    let Some(instant) = instant.get() else {
        return ABSENT_DATE_PLACEHOLDER.to_string();
    };
    let civil = instant.with_timezone(&zone.offset());
    let pattern = match locale {
        DisplayLocale::EnGb => "%d/%m/%Y, %H:%M:%S",
        DisplayLocale::EnUs => "%m/%d/%Y, %-I:%M:%S %p",
        DisplayLocale::Iso => "%Y-%m-%d %H:%M:%S",
    };
    civil.format(pattern).to_string()
}

/// Title, or the untitled placeholder.
pub fn display_title(record: &JobRecord) -> &str {
    record
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED_ROLE_PLACEHOLDER)
}

/// Company name, or the company placeholder.
pub fn display_company(record: &JobRecord) -> &str {
    record
        .company_name
        .as_deref()
        .filter(|company| !company.is_empty())
        .unwrap_or(COMPANY_PLACEHOLDER)
}

/// Description as plain text: strings verbatim, structured payloads as compact JSON.
pub fn description_text(record: &JobRecord) -> Option<DisplayText> {
    match record.description.as_ref()? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// One-line summary: `Title | Company • date`.
pub fn compact_line(record: &JobRecord, instant: CanonicalInstant, config: &MonitorConfig) -> DisplayText {
    format!(
        "{} | {} • {}",
        display_title(record),
        display_company(record),
        format_date(instant, config.zone, config.locale)
    )
}

/// Detailed summary: `Title | Company • Updated: date-time`.
pub fn detail_line(record: &JobRecord, instant: CanonicalInstant, config: &MonitorConfig) -> DisplayText {
    format!(
        "{} | {} • Updated: {}",
        display_title(record),
        display_company(record),
        format_date_time(instant, config.zone, config.locale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawDate;
    use crate::dates::normalize_date;
    use serde_json::json;

    fn instant(raw: &str, zone: CivilZone) -> CanonicalInstant {
        normalize_date(Some(&RawDate::text(raw)), zone)
    }

    #[test]
    fn dates_render_per_locale() {
        let zone = CivilZone::utc();
        let at = instant("10/03/2024, 5:07:09pm", zone);
        assert_eq!(format_date(at, zone, DisplayLocale::EnGb), "10/03/2024");
        assert_eq!(format_date(at, zone, DisplayLocale::EnUs), "03/10/2024");
        assert_eq!(format_date(at, zone, DisplayLocale::Iso), "2024-03-10");
        assert_eq!(
            format_date_time(at, zone, DisplayLocale::EnGb),
            "10/03/2024, 17:07:09"
        );
        assert_eq!(
            format_date_time(at, zone, DisplayLocale::EnUs),
            "03/10/2024, 5:07:09 PM"
        );
        assert_eq!(
            format_date_time(at, zone, DisplayLocale::Iso),
            "2024-03-10 17:07:09"
        );
    }

    #[test]
    fn rendering_zone_shifts_the_civil_date() {
        let at = instant("2024-03-10T22:30:00Z", CivilZone::utc());
        let east: CivilZone = "+03:00".parse().unwrap();
        assert_eq!(format_date(at, east, DisplayLocale::Iso), "2024-03-11");
    }

    #[test]
    fn absent_renders_placeholder() {
        let zone = CivilZone::utc();
        assert_eq!(
            format_date(CanonicalInstant::ABSENT, zone, DisplayLocale::EnGb),
            "—"
        );
        assert_eq!(
            format_date_time(CanonicalInstant::ABSENT, zone, DisplayLocale::Iso),
            "—"
        );
    }

    #[test]
    fn missing_text_fields_render_placeholders() {
        let record = JobRecord {
            title: Some(String::new()),
            ..JobRecord::default()
        };
        assert_eq!(display_title(&record), "Untitled Role");
        assert_eq!(display_company(&record), "Company");
        assert_eq!(description_text(&record), None);

        let config = MonitorConfig::default();
        assert_eq!(
            compact_line(&record, CanonicalInstant::ABSENT, &config),
            "Untitled Role | Company • —"
        );
    }

    #[test]
    fn descriptions_render_strings_and_json() {
        let plain = JobRecord {
            description: Some(json!("Ship features")),
            ..JobRecord::default()
        };
        assert_eq!(description_text(&plain).as_deref(), Some("Ship features"));

        let structured = JobRecord {
            description: Some(json!({"team": "core"})),
            ..JobRecord::default()
        };
        assert_eq!(
            description_text(&structured).as_deref(),
            Some(r#"{"team":"core"}"#)
        );
    }

    #[test]
    fn detail_line_includes_date_time() {
        let zone = CivilZone::utc();
        let record = JobRecord {
            title: Some("Engineer".into()),
            company_name: Some("Acme".into()),
            ..JobRecord::default()
        };
        let line = detail_line(&record, instant("10/03/2024, 9:00am", zone), &MonitorConfig::default());
        assert_eq!(line, "Engineer | Acme • Updated: 10/03/2024, 09:00:00");
    }
}
