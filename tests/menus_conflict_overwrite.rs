
use serde_json::json;
use test_support::*;

#[test]
fn same_slot_requires_overwrite_and_keeps_the_id() {
    let ws = temp_dir("messmated-menus");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    let first = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "menus.add",
        json!({ "date": "2024-05-01", "mealType": "lunch", "items": "Rice", "price": 20.0 }),
    );
    let first_id = first["menu"]["id"].clone();

    let code = request_err(
        &mut stdin,
        &mut reader,
        "2",
        "menus.add",
        json!({ "date": "2024-05-01", "mealType": "lunch", "items": "Dal", "price": 25.0 }),
    );
    assert_eq!(code, "menu_conflict");

    // Same date, different meal: no conflict.
    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "menus.add",
        json!({ "date": "2024-05-01", "mealType": "dinner", "items": "Roti", "price": 30.0 }),
    );

    let replaced = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "menus.add",
        json!({ "date": "2024-05-01", "mealType": "lunch", "items": "Dal", "price": 25.0, "overwrite": true }),
    );
    assert_eq!(replaced["menu"]["id"], first_id);
    assert_eq!(replaced["menu"]["items"], "Dal");

    let list = request_ok(&mut stdin, &mut reader, "5", "menus.list", json!({}));
    assert_eq!(list["menus"].as_array().unwrap().len(), 2);

    let filtered = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "menus.filter",
        json!({ "date": "2024-05-01", "mealType": "lunch" }),
    );
    let menus = filtered["menus"].as_array().unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["items"], "Dal");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn price_must_be_non_negative() {
    let ws = temp_dir("messmated-menus-price");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    let code = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "menus.add",
        json!({ "date": "2024-05-01", "mealType": "lunch", "items": "Rice", "price": -5.0 }),
    );
    assert_eq!(code, "bad_params");

    drop(stdin);
    let _ = child.wait();
}
