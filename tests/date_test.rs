use chrono::{TimeZone, Utc};
use email_decoder::*;

#[test]
fn test_parse_date_utc() {
    let date = parse_date("Mon, 01 Jan 2024 10:00:00 +0000").unwrap();
    assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
}

#[test]
fn test_parse_date_offsets_same_instant() {
    let instants = [
        "Mon, 01 Jan 2024 10:00:00 +0000",
        "Mon, 01 Jan 2024 11:00:00 +0100",
        "Mon, 01 Jan 2024 05:00:00 -0500",
        "Tue, 02 Jan 2024 00:30:00 +1430",
        "Mon, 01 Jan 2024 10:00:00 GMT",
        "Mon, 01 Jan 2024 05:00:00 EST",
    ];
    let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    for value in &instants {
        assert_eq!(parse_date(value).unwrap(), expected, "{value}");
    }
}

#[test]
fn test_parse_date_without_weekday() {
    let date = parse_date("1 Feb 2025 08:15:30 +0200").unwrap();
    assert_eq!(date, Utc.with_ymd_and_hms(2025, 2, 1, 6, 15, 30).unwrap());
}

#[test]
fn test_parse_date_invalid() {
    let err = parse_date("not a date").unwrap_err();
    assert!(matches!(err, DecodeError::InvalidDate(_)));
}

#[test]
fn test_received_date_part() {
    assert_eq!(
        received_date_part("from a by x.example.com; Mon, 01 Jan 2024 10:00:00 +0000"),
        Some("Mon, 01 Jan 2024 10:00:00 +0000")
    );
    assert_eq!(
        received_date_part("from a (b; c) by x; Mon, 01 Jan 2024 10:00:00 +0000"),
        Some("Mon, 01 Jan 2024 10:00:00 +0000")
    );
    assert_eq!(received_date_part("no semicolon here"), None);
    assert_eq!(received_date_part("trailing;  "), None);
}

#[test]
fn test_format_timestamp() {
    let date = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
    assert_eq!(format_timestamp(&date), "2024-03-09 07:05:01");
}

fn typed(raw: &HeaderStore) -> (HeaderStore, Warnings) {
    let mut warnings = Warnings::new();
    let headers = normalize_headers(raw, &mut warnings);
    (headers, warnings)
}

#[test]
fn test_message_date_prefers_date_header() {
    let raw = raw_header_store([
        ("Received", "by x.example.com; Tue, 02 Jan 2024 10:00:00 +0000"),
        ("Date", "Mon, 01 Jan 2024 10:00:00 +0000"),
    ]);
    let (headers, mut warnings) = typed(&raw);

    let date = resolve_message_date(&headers, &raw, &mut warnings);
    assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
}

#[test]
fn test_message_date_falls_back_to_received() {
    let raw = raw_header_store([(
        "Received",
        "by x.example.com; Mon, 01 Jan 2024 10:00:00 +0000",
    )]);
    let (headers, mut warnings) = typed(&raw);

    let date = resolve_message_date(&headers, &raw, &mut warnings);
    assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
    assert!(warnings.is_empty());
}

#[test]
fn test_message_date_bad_date_uses_received() {
    let raw = raw_header_store([
        ("Date", "yesterday-ish"),
        ("Received", "by x.example.com; Mon, 01 Jan 2024 10:00:00 +0000"),
    ]);
    let (headers, mut warnings) = typed(&raw);
    assert!(warnings.has(WarningTag::InvalidDateHeader));

    let date = resolve_message_date(&headers, &raw, &mut warnings);
    assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
}

#[test]
fn test_message_date_absent_when_unrecoverable() {
    let raw = raw_header_store([
        ("Date", "garbage"),
        ("Received", "by x.example.com; also garbage"),
    ]);
    let (headers, mut warnings) = typed(&raw);

    let date = resolve_message_date(&headers, &raw, &mut warnings);
    assert!(date.is_none());

    let warnings = warnings.into_vec();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[1].header.as_deref(), Some("Received"));
    assert_eq!(warnings[1].value, "also garbage");
}

#[test]
fn test_message_date_absent_without_headers() {
    let raw = raw_header_store([("Subject", "no dates")]);
    let (headers, mut warnings) = typed(&raw);

    assert!(resolve_message_date(&headers, &raw, &mut warnings).is_none());
    assert!(warnings.is_empty());
}
