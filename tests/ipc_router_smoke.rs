
use serde_json::json;
use test_support::*;

#[test]
fn smoke_all_method_families() {
    let ws = temp_dir("messmated-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("version").is_some());
    assert!(health.get("workspacePath").unwrap().is_null());

    // Everything that touches the store requires a workspace first.
    let code = request_err(&mut stdin, &mut reader, "2", "users.list", json!({}));
    assert_eq!(code, "no_workspace");

    let selected = select_workspace(&mut stdin, &mut reader, &ws);
    assert_eq!(selected.get("removedDuplicates").unwrap(), 0);

    let user = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "users.add",
        json!({ "name": "Ana", "email": "ana@x.com", "rollNumber": "R1", "password": "pw" }),
    );
    assert_eq!(user["user"]["id"], 1);
    assert_eq!(user["user"]["userType"], "STUDENT");
    assert_eq!(user["user"]["hostel"], "Not Assigned");

    let staff = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "staff.add",
        json!({ "name": "Cook", "email": "cook@mess.com", "shift": "morning", "password": "pw" }),
    );
    assert!(staff["staff"]["staffId"]
        .as_str()
        .unwrap()
        .starts_with("STF"));
    assert_eq!(staff["staff"]["status"], "active");
    assert_eq!(staff["staff"]["role"], "Kitchen Staff");

    let complaint = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "complaints.add",
        json!({ "title": "Cold food", "student": "Ana", "description": "Dinner was cold" }),
    );
    assert_eq!(complaint["complaint"]["status"], "pending");
    assert_eq!(complaint["complaint"]["priority"], "medium");

    let feedback = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "feedback.add",
        json!({ "student": "Ana", "foodRating": 4, "serviceRating": 5 }),
    );
    assert_eq!(feedback["feedback"]["staffStatus"], "unread");

    let menu = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "menus.add",
        json!({ "date": "2024-05-01", "mealType": "lunch", "items": "Rice, Dal", "price": 45.0 }),
    );
    assert_eq!(menu["menu"]["id"], 1);

    let stats = request_ok(&mut stdin, &mut reader, "8", "stats.overview", json!({}));
    assert_eq!(stats["stats"]["totalUsers"], 1);
    assert_eq!(stats["stats"]["totalStaff"], 1);
    assert_eq!(stats["stats"]["pendingComplaints"], 1);
    assert_eq!(stats["stats"]["menuCount"], 1);

    let (resp, _) = request_with_events(
        &mut stdin,
        &mut reader,
        "9",
        "users.nonexistent",
        json!({}),
    );
    assert_eq!(resp["ok"], false);
    assert_eq!(resp["error"]["code"], "not_implemented");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn get_reports_not_found() {
    let ws = temp_dir("messmated-notfound");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    let code = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "users.get",
        json!({ "id": 99 }),
    );
    assert_eq!(code, "not_found");

    drop(stdin);
    let _ = child.wait();
}
