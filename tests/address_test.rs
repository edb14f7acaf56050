use email_decoder::*;

fn pair(name: &str, email: &str) -> (String, String) {
    (name.to_string(), email.to_string())
}

// --- validation ---

#[test]
fn test_valid_addr_specs() {
    let valid = [
        "john@example.com",
        "first.last+tag@sub.example.co.uk",
        "\"john doe\"@example.com",
        "user@[192.168.0.1]",
        "root@localhost",
    ];
    for email in &valid {
        assert!(is_valid_addr_spec(email), "{email} should be valid");
    }
}

#[test]
fn test_invalid_addr_specs() {
    let invalid = [
        "not-an-email",
        "",
        "@example.com",
        "john@",
        "a@b@c.com",
        "john..doe@example.com",
        "john doe@example.com",
        "john@-example.com",
    ];
    for email in &invalid {
        assert!(!is_valid_addr_spec(email), "{email} should be invalid");
    }
}

#[test]
fn test_validity_ignores_display_name() {
    let addr = Address::new(Some("<<weird>> \"name\"".into()), "ok@example.com");
    assert!(addr.is_valid());

    let addr = Address::new(Some("Fine Name".into()), "broken");
    assert!(!addr.is_valid());
}

#[test]
fn test_address_empty_name_is_absent() {
    let addr = Address::new(Some(String::new()), "a@example.com");
    assert!(addr.name.is_none());
}

#[test]
fn test_address_display() {
    let named = Address::new(Some("Alice".into()), "alice@test.com");
    assert_eq!(named.to_string(), "Alice <alice@test.com>");

    let bare = Address::new(None, "bob@test.com");
    assert_eq!(bare.to_string(), "bob@test.com");
}

// --- parsing ---

#[test]
fn test_parse_single_value_sorted() {
    let pairs = parse_address_value("Zed <zed@example.com>, amy@example.com, Bob <bob@example.com>");
    assert_eq!(
        pairs,
        [
            pair("", "amy@example.com"),
            pair("Bob", "bob@example.com"),
            pair("Zed", "zed@example.com"),
        ]
    );
}

#[test]
fn test_parse_quoted_display_name_with_comma() {
    let pairs = parse_address_value("\"Doe, John\" <john@example.com>, jane@example.com");
    assert_eq!(
        pairs,
        [pair("", "jane@example.com"), pair("Doe, John", "john@example.com")]
    );
}

#[test]
fn test_parse_values_deduplicates_across_occurrences() {
    let pairs = parse_address_values([
        "Ann <ann@example.com>, bob@example.com",
        "bob@example.com",
        "Ann <ann@example.com>",
    ]);
    assert_eq!(
        pairs,
        [pair("", "bob@example.com"), pair("Ann", "ann@example.com")]
    );
}

#[test]
fn test_parse_order_independent() {
    let a = parse_address_values(["x@example.com, y@example.com", "z@example.com"]);
    let b = parse_address_values(["z@example.com", "y@example.com, x@example.com"]);
    assert_eq!(a, b);
}

#[test]
fn test_parse_group_is_flattened() {
    let pairs = parse_address_value("Friends: a@example.com, b@example.com;");
    assert_eq!(pairs, [pair("", "a@example.com"), pair("", "b@example.com")]);
}

#[test]
fn test_parse_decodes_encoded_words() {
    let pairs = parse_address_value("=?UTF-8?Q?Andr=C3=A9?= <andre@example.com>");
    assert_eq!(pairs, [pair("André", "andre@example.com")]);
}

#[test]
fn test_parse_empty_value() {
    assert!(parse_address_value("").is_empty());
    assert!(parse_address_value("   ").is_empty());
}

// --- resolution ---

#[test]
fn test_resolve_drops_invalid_and_warns() {
    let mut warnings = Warnings::new();
    let addrs = resolve_addresses("To", ["not-an-email, bob@example.com"], &mut warnings);

    assert_eq!(addrs, [Address::new(None, "bob@example.com")]);
    assert!(warnings.has(WarningTag::InvalidEmailAddress));

    let invalid = warnings
        .into_vec()
        .into_iter()
        .find(|w| w.tag == WarningTag::InvalidEmailAddress)
        .unwrap();
    assert_eq!(invalid.header.as_deref(), Some("To"));
    assert_eq!(invalid.value, "not-an-email");
}

#[test]
fn test_resolve_reports_unparseable_value_once() {
    let mut warnings = Warnings::new();
    resolve_addresses("To", ["not-an-email, bob@example.com"], &mut warnings);

    let warnings = warnings.into_vec();
    let unparseable: Vec<_> = warnings
        .iter()
        .filter(|w| w.tag == WarningTag::UnparseableAddressHeader)
        .collect();
    assert_eq!(unparseable.len(), 1);
    assert_eq!(unparseable[0].header.as_deref(), Some("To"));
    assert_eq!(unparseable[0].value, "not-an-email, bob@example.com");
}

#[test]
fn test_resolve_clean_value_has_no_warnings() {
    let mut warnings = Warnings::new();
    let addrs = resolve_addresses(
        "To",
        ["Ann <ann@example.com>, bob@example.com"],
        &mut warnings,
    );

    assert_eq!(addrs.len(), 2);
    assert!(warnings.is_empty());
}

#[test]
fn test_resolve_encoded_name_with_comma() {
    let mut warnings = Warnings::new();
    let addrs = resolve_addresses(
        "To",
        ["=?utf-8?q?Smith=2C_Ann?= <ann@example.com>, bob@example.com"],
        &mut warnings,
    );

    assert_eq!(
        addrs,
        [
            Address::new(None, "bob@example.com"),
            Address::new(Some("Smith, Ann".into()), "ann@example.com"),
        ]
    );
    assert!(warnings.is_empty());
}

#[test]
fn test_resolve_all_invalid_yields_empty() {
    let mut warnings = Warnings::new();
    let addrs = resolve_addresses("CC", ["nobody", "still nobody"], &mut warnings);

    assert!(addrs.is_empty());
    let warnings = warnings.into_vec();
    let count = |tag: WarningTag| warnings.iter().filter(|w| w.tag == tag).count();
    assert_eq!(count(WarningTag::InvalidEmailAddress), 2);
    assert_eq!(count(WarningTag::UnparseableAddressHeader), 2);
}
