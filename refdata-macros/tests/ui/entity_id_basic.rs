use refdata_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct CountryId(i64);

#[entity_id(debug = false)]
struct ExternalRef(Uuid);

impl std::fmt::Debug for ExternalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExternalRef(..)")
    }
}

fn main() {
    let id = CountryId::new(7);
    let _ = format!("{:?} {}", id, id); // 默认启用 Debug
    let parsed: CountryId = "7".parse().unwrap();
    assert!(parsed == id);
    let raw: i64 = id.into();
    assert_eq!(raw, 7);

    let r = ExternalRef::new(Uuid::new_v4());
    let _ = format!("{:?}", r); // 手写 Debug 可编译，说明未自动派生
}
