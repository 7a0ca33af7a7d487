use parfum_core::{Ingredient, Medley, Period, Status, Unit};
use serde_json::json;
use uuid::Uuid;

#[test]
fn enums_serialize_as_snake_case_variants() {
    assert_eq!(serde_json::to_value(Unit::Pipette).unwrap(), json!("pipette"));
    assert_eq!(serde_json::to_value(Period::Week).unwrap(), json!("week"));
    assert_eq!(serde_json::to_value(Status::Tbd).unwrap(), json!("tbd"));
}

#[test]
fn medley_json_shape_is_stable() {
    let scenting_id = Uuid::new_v4();
    let mut medley = Medley::with_id(Uuid::new_v4(), scenting_id, 1_688_212_800_000);
    medley.name = "Orange & Fennel #1".to_string();
    medley.maturity = 14;
    medley.ingredients = vec![Ingredient::named("Nutmeg", 1.0, Unit::Gram)];

    let value = serde_json::to_value(&medley).unwrap();
    assert_eq!(value["scenting_id"], json!(scenting_id.to_string()));
    assert_eq!(value["period"], json!("day"));
    assert_eq!(value["status"], json!("tbd"));
    assert_eq!(value["maturity"], json!(14));
    assert_eq!(value["ingredients"][0]["unit"], json!("gram"));

    let back: Medley = serde_json::from_value(value).unwrap();
    assert_eq!(back, medley);
}
