use record_tree::{RecordErrorKind, accessor};

#[test]
fn normalizes_data_keys() {
    let cases = [
        ("first_name", "FirstName"),
        ("_first_name", "FirstName"),
        ("FirstName", "FirstName"),
        ("firstName", "FirstName"),
        ("x", "X"),
        ("date_of_birth", "DateOfBirth"),
        ("a__b", "AB"),
        ("trailing_", "Trailing"),
    ];

    for (key, expected) in cases {
        assert_eq!(accessor::normalize(key).unwrap(), expected, "{key}");
    }
}

#[test]
fn normalization_is_idempotent() {
    let keys = [
        "first_name",
        "_first_name",
        "__first_name",
        "already_Normalized_Name",
        "éclair_au_chocolat",
        "x_1_y",
        "ABC",
        "_a",
    ];

    for key in keys {
        let once = accessor::normalize(key).unwrap();
        let twice = accessor::normalize(&once).unwrap();
        assert_eq!(once, twice, "{key}");
    }
}

#[test]
fn accessor_names() {
    assert_eq!(accessor::getter_of("first_name").unwrap(), "getFirstName");
    assert_eq!(accessor::setter_of("_first_name").unwrap(), "setFirstName");
    assert_eq!(accessor::getter_of("x").unwrap(), "getX");
}

#[test]
fn empty_names_are_caller_errors() {
    let err = accessor::getter_of("").unwrap_err();
    assert!(matches!(err.kind(), RecordErrorKind::InvalidArgument(_)));
    assert!(err.to_string().starts_with("invalid argument"));

    let err = accessor::setter_of("_").unwrap_err();
    assert!(matches!(err.kind(), RecordErrorKind::InvalidArgument(_)));
}
