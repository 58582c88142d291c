mod common;

use std::collections::HashMap;

use common::{Person, Request};
use facet::Facet;
use record_tree::{Record, Value, map_of, reflect};

#[derive(Facet)]
struct Applicant {
    first_name: String,
    last_name: String,
    age: u8,
    vip: bool,
    middle_name: Option<String>,
    visits: usize,
    balance: isize,
}

#[test]
fn struct_fields_become_data_keys() {
    let applicant = Applicant {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        age: 36,
        vip: true,
        middle_name: None,
        visits: 3,
        balance: -12,
    };

    let data = reflect::to_map(&applicant).unwrap();
    let keys: Vec<_> = data.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["first_name", "last_name", "age", "vip", "middle_name", "visits", "balance"]
    );
    assert_eq!(data["age"], Value::Int(36));
    assert_eq!(data["visits"], Value::Int(3));
    assert_eq!(data["balance"], Value::Int(-12));
    assert_eq!(data["vip"], Value::Bool(true));
    assert!(data["middle_name"].is_null());
}

#[test]
fn reflected_structs_merge_into_records() {
    let applicant = Applicant {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        age: 85,
        vip: false,
        middle_name: Some("Brewster".into()),
        visits: 0,
        balance: 0,
    };

    let mut person = Person::default();
    person.merge(&reflect::to_map(&applicant).unwrap()).unwrap();

    assert_eq!(person.first_name, "Grace");
    assert_eq!(person.middle_name.as_deref(), Some("Brewster"));
    assert_eq!(person.age, Some(85));
    assert!(!person.vip);
}

#[derive(Facet)]
struct Order {
    reference: String,
    customer: Customer,
    addresses: Vec<Street>,
    extra_info: HashMap<String, String>,
    weight: f32,
}

#[derive(Facet)]
struct Customer {
    first_name: String,
}

#[derive(Facet)]
struct Street {
    street: String,
    city: String,
}

#[test]
fn nested_structs_lists_and_maps() {
    let order = Order {
        reference: "R-7".into(),
        customer: Customer {
            first_name: "Ada".into(),
        },
        addresses: vec![Street {
            street: "1 Main St".into(),
            city: "Zurich".into(),
        }],
        extra_info: HashMap::from([("channel".to_owned(), "web".to_owned())]),
        weight: 1.5,
    };

    let data = reflect::to_map(&order).unwrap();
    assert_eq!(data["customer"], Value::from(map_of([("first_name", "Ada")])));
    assert_eq!(data["extra_info"], Value::from(map_of([("channel", "web")])));
    assert_eq!(data["weight"], Value::Float(1.5));

    let mut request = Request::default();
    request.merge(&data).unwrap();
    assert_eq!(request.reference.as_deref(), Some("R-7"));
    assert_eq!(request.customer.as_ref().unwrap().first_name, "Ada");
    assert_eq!(request.addresses[0].city, "Zurich");
    assert_eq!(request.extra_info, Value::from(map_of([("channel", "web")])));
    assert!(request.base.side_storage().is_empty());
}

#[derive(Facet)]
#[repr(u8)]
#[allow(dead_code)]
enum Status {
    Active,
    Suspended { reason: String },
}

#[derive(Facet)]
struct Account {
    status: Status,
    previous: Option<Status>,
}

#[test]
fn enum_variants_are_externally_tagged() {
    let account = Account {
        status: Status::Active,
        previous: Some(Status::Suspended {
            reason: "audit".into(),
        }),
    };

    let data = reflect::to_map(&account).unwrap();
    assert_eq!(data["status"], Value::from("Active"));
    assert_eq!(
        data["previous"],
        Value::from(map_of([(
            "Suspended",
            Value::from(map_of([("reason", "audit")]))
        )]))
    );
}

#[test]
fn non_structs_are_rejected() {
    assert!(reflect::to_map(&vec![1u8, 2, 3]).is_err());
    assert!(reflect::to_map(&String::from("loose")).is_err());
}
