use refdata_domain::entity::Entity;
use refdata_domain::versioned;

#[versioned]
struct Timezone {
    offset_minutes: i32,
}

#[versioned(debug = false)]
struct Opaque {}

impl std::fmt::Debug for Opaque {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Opaque(..)")
    }
}

fn main() {
    let tz = Timezone::default();
    assert_eq!(Timezone::TYPE_NAME, "Timezone");
    assert!(tz.id().is_none());
    assert!(tz.version().is_new());
    assert!(tz.validate().is_ok());
    assert_eq!(tz.offset_minutes, 0);
    assert_eq!(Timezone::base_columns().len(), 11);

    assert_serde::<Timezone>();

    let _ = format!("{:?}", Opaque::default());
}

fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}
