//! Record types shared by the integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use record_tree::{Descriptor, Record, RecordBase, Value};

/// A person, with a mix of required and optional properties.
#[derive(Debug, Clone, Default)]
pub struct Person {
    pub base: RecordBase,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub age: Option<i64>,
    pub vip: bool,
}

impl Record for Person {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Person>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::<Person>::builder("Person")
                .field("first_name", |p| &p.first_name, |p| &mut p.first_name)
                .field("last_name", |p| &p.last_name, |p| &mut p.last_name)
                .field("middle_name", |p| &p.middle_name, |p| &mut p.middle_name)
                .field("age", |p| &p.age, |p| &mut p.age)
                .field("vip", |p| &p.vip, |p| &mut p.vip)
                .required(["first_name", "last_name"])
                .optional(["middle_name", "age"])
                .build()
                .expect("person descriptor")
        })
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }
}

/// A postal address.
#[derive(Debug, Clone, Default)]
pub struct Address {
    pub base: RecordBase,
    pub street: String,
    pub city: String,
    pub zip: Option<String>,
}

impl Record for Address {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Address>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::<Address>::builder("Address")
                .field("street", |a| &a.street, |a| &mut a.street)
                .field("city", |a| &a.city, |a| &mut a.city)
                .field("zip", |a| &a.zip, |a| &mut a.zip)
                .optional(["zip"])
                .build()
                .expect("address descriptor")
        })
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }
}

/// A request document nesting a person and a list of addresses.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub base: RecordBase,
    pub reference: Option<String>,
    pub customer: Option<Person>,
    pub addresses: Vec<Address>,
    pub extra_info: Value,
}

impl Record for Request {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Request>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::<Request>::builder("Request")
                .field("_reference", |r| &r.reference, |r| &mut r.reference)
                .record("customer", |r| &r.customer, |r| &mut r.customer)
                .records("addresses", |r| &r.addresses, |r| &mut r.addresses)
                .field("extra_info", |r| &r.extra_info, |r| &mut r.extra_info)
                .read_only("address_count", |r| {
                    Ok(Value::Int(r.addresses.len() as i64))
                })
                .optional(["reference", "customer", "extra_info"])
                .build()
                .expect("request descriptor")
        })
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }
}

/// Root record named `A` with a scalar and a list of `Y` records.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    pub base: RecordBase,
    pub x: i64,
    pub y: Vec<Leaf>,
}

impl Record for Sample {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Sample>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::<Sample>::builder("A")
                .field("x", |s| &s.x, |s| &mut s.x)
                .records("y", |s| &s.y, |s| &mut s.y)
                .build()
                .expect("sample descriptor")
        })
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }
}

/// Record named `Y` holding one integer.
#[derive(Debug, Clone, Default)]
pub struct Leaf {
    pub base: RecordBase,
    pub z: i64,
}

impl Record for Leaf {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Leaf>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::<Leaf>::builder("Y")
                .field("z", |l| &l.z, |l| &mut l.z)
                .build()
                .expect("leaf descriptor")
        })
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }
}

/// Record with one free-form collection property.
#[derive(Debug, Clone, Default)]
pub struct Basket {
    pub base: RecordBase,
    pub items: Value,
}

impl Record for Basket {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Basket>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::<Basket>::builder("Basket")
                .field("items", |b| &b.items, |b| &mut b.items)
                .build()
                .expect("basket descriptor")
        })
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }
}

/// A `Leaf` holding `z`.
pub fn leaf(z: i64) -> Leaf {
    Leaf {
        z,
        ..Leaf::default()
    }
}
