use refdata_macros::value_object;

#[value_object]
struct IsoCode {
    value: String,
}

#[value_object(debug = false)]
struct NonDebugVO(i32);

#[value_object]
enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

fn main() {
    let _ = format!("{:?}", IsoCode { value: "US".into() });

    let a = IsoCode::default();
    let _b = a.clone();
    let _eq = a == IsoCode { value: String::new() };

    let _ = NonDebugVO(1);

    let o: Orientation = Default::default();
    assert!(o == Orientation::Portrait);
    let _ = Orientation::Landscape;
}
