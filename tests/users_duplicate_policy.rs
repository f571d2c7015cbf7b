
use serde_json::json;
use test_support::*;

#[test]
fn duplicate_email_and_roll_are_rejected_without_writes() {
    let ws = temp_dir("messmated-users-dup");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "users.add",
        json!({ "name": "Ana", "email": "ana@x.com", "rollNumber": "R1", "password": "pw" }),
    );

    let code = request_err(
        &mut stdin,
        &mut reader,
        "2",
        "users.add",
        json!({ "name": "Ana Again", "email": "ana@x.com", "rollNumber": "R2", "password": "pw" }),
    );
    assert_eq!(code, "duplicate_email");

    let code = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "users.add",
        json!({ "name": "Bob", "email": "bob@x.com", "rollNumber": "R1", "password": "pw" }),
    );
    assert_eq!(code, "duplicate_roll_number");

    // Rejections leave the collection untouched, in memory and on disk.
    let list = request_ok(&mut stdin, &mut reader, "4", "users.list", json!({}));
    assert_eq!(list["users"].as_array().unwrap().len(), 1);
    let disk = read_data_file(&ws);
    assert_eq!(disk["users"].as_array().unwrap().len(), 1);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn placeholder_roll_never_conflicts() {
    let ws = temp_dir("messmated-users-placeholder");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "users.add",
        json!({ "name": "Ana", "email": "ana@x.com", "rollNumber": "Not Assigned", "password": "pw" }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "users.add",
        json!({ "name": "Bob", "email": "bob@x.com", "rollNumber": "Not Assigned", "password": "pw" }),
    );

    let list = request_ok(&mut stdin, &mut reader, "3", "users.list", json!({}));
    assert_eq!(list["users"].as_array().unwrap().len(), 2);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn ids_continue_from_the_maximum_present() {
    let ws = temp_dir("messmated-users-ids");
    seed_data_file(
        &ws,
        &json!({
            "users": [
                { "id": 1, "name": "Ana", "email": "ana@x.com", "userType": "STUDENT", "rollNumber": "R1" },
                { "id": 5, "name": "Bob", "email": "bob@x.com", "userType": "STUDENT", "rollNumber": "R2" }
            ]
        }),
    );
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    let added = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "users.add",
        json!({ "name": "Cid", "email": "cid@x.com", "rollNumber": "R3", "password": "pw" }),
    );
    assert_eq!(added["user"]["id"], 6);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn update_excludes_self_from_uniqueness() {
    let ws = temp_dir("messmated-users-update");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "users.add",
        json!({ "name": "Ana", "email": "ana@x.com", "rollNumber": "R1", "password": "pw" }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "users.add",
        json!({ "name": "Bob", "email": "bob@x.com", "rollNumber": "R2", "password": "pw" }),
    );

    // Re-saving your own email is fine; taking someone else's is not.
    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "users.update",
        json!({ "id": 1, "patch": { "email": "ana@x.com", "room": "B-204" } }),
    );
    assert_eq!(updated["user"]["room"], "B-204");

    let code = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "users.update",
        json!({ "id": 1, "patch": { "email": "bob@x.com" } }),
    );
    assert_eq!(code, "duplicate_email");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn filter_intersects_type_and_search() {
    let ws = temp_dir("messmated-users-filter");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &ws);

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "users.add",
        json!({ "name": "Ana Rao", "email": "ana@x.com", "rollNumber": "R1", "password": "pw" }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "users.add",
        json!({ "name": "Bob Lal", "email": "bob@x.com", "rollNumber": "R2", "password": "pw" }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "users.add",
        json!({ "name": "Anand Das", "email": "anand@x.com", "userType": "STAFF", "rollNumber": "R3", "password": "pw" }),
    );

    let filtered = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "users.filter",
        json!({ "type": "STUDENT", "search": "ANA" }),
    );
    let users = filtered["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Ana Rao");

    drop(stdin);
    let _ = child.wait();
}
