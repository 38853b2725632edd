use std::net::SocketAddr;
use std::sync::Arc;

use chrono::NaiveDate;
use parkwise_server::{build_occupancy_router, build_spot_registry_router, AppState};
use parkwise_store::{FixedClock, ParkingStore};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

struct Services {
    spots: SocketAddr,
    occupancy: SocketAddr,
    clock: Arc<FixedClock>,
}

async fn spawn_services() -> Services {
    let start = NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .expect("start time");
    let clock = Arc::new(FixedClock::new(start));
    let store = Arc::new(ParkingStore::open_in_memory(clock.clone()).expect("store"));

    let mut addrs = Vec::new();
    for app in [
        build_spot_registry_router(AppState::new(store.clone())),
        build_occupancy_router(AppState::new(store.clone())),
    ] {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        addrs.push(listener.local_addr().expect("local addr"));
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    }
    Services {
        spots: addrs[0],
        occupancy: addrs[1],
        clock,
    }
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    let payload = body.unwrap_or("");
    if body.is_some() {
        req.push_str("Content-Type: application/json\r\n");
    }
    req.push_str(&format!("Content-Length: {}\r\n\r\n{payload}", payload.len()));
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

async fn json_call(addr: SocketAddr, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
    let raw = body.map(|b| b.to_string());
    let (status, _, text) = send_raw(addr, method, path, &[], raw.as_deref()).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, value)
}

async fn create_spot(svc: &Services, number: &str, flag: &str) -> i64 {
    let (status, spot) = json_call(
        svc.spots,
        "POST",
        "/api/parking-spots",
        Some(json!({"spot_number": number, "type": "compact", "is_available": flag})),
    )
    .await;
    assert_eq!(status, 200, "create spot: {spot}");
    spot["id"].as_i64().expect("spot id")
}

async fn spot_flag(svc: &Services, id: i64) -> String {
    let (status, spot) = json_call(svc.spots, "GET", &format!("/api/parking-spots/{id}"), None).await;
    assert_eq!(status, 200);
    spot["is_available"].as_str().expect("flag").to_string()
}

#[tokio::test]
async fn entry_then_exit_round_trip_keeps_flag_in_step() {
    let svc = spawn_services().await;
    let id = create_spot(&svc, "A1", "yes").await;

    let (status, entry) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-entries",
        Some(json!({"spot_number": "A1", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(entry["spot_number"], "A1");
    assert_eq!(entry["license_plate"], "XYZ123");
    assert_eq!(entry["entry_time"], "19-10-2026 08:30:00");
    assert!(entry.get("exit_time").is_none());
    assert!(entry["id"].as_i64().is_some());
    assert_eq!(spot_flag(&svc, id).await, "no");

    svc.clock.advance(chrono::Duration::minutes(45));
    let (status, exit) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-exits",
        Some(json!({"spot_number": "A1", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(exit["id"], entry["id"]);
    assert_eq!(exit["entry_time"], "19-10-2026 08:30:00");
    assert_eq!(exit["exit_time"], "19-10-2026 09:15:00");
    assert_eq!(spot_flag(&svc, id).await, "yes");

    let (status, again) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-exits",
        Some(json!({"spot_number": "A1", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(again, Value::String("Active vehicle entry not found\n".to_string()));
}

#[tokio::test]
async fn entry_rejections_do_not_mutate_state() {
    let svc = spawn_services().await;
    let id = create_spot(&svc, "B2", "no").await;

    let movement = json!({"spot_number": "B2", "license_plate": "XYZ123"});
    let (status, _) = json_call(svc.occupancy, "POST", "/api/vehicle-entries", Some(movement)).await;
    assert_eq!(status, 409);
    let (status, records) = json_call(svc.occupancy, "GET", "/api/vehicle-exits/B2", None).await;
    assert_eq!(status, 200);
    assert_eq!(records, json!([]));
    assert_eq!(spot_flag(&svc, id).await, "no");

    let (status, _) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-entries",
        Some(json!({"spot_number": "nope", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _, body) = send_raw(
        svc.occupancy,
        "POST",
        "/api/vehicle-entries",
        &[],
        Some("{\"spot_number\":"),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, "Invalid input\n");

    let (status, _) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-exits",
        Some(json!({"spot_number": "B2", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(spot_flag(&svc, id).await, "no");
}

#[tokio::test]
async fn lookup_returns_single_first_record() {
    let svc = spawn_services().await;
    create_spot(&svc, "C3", "yes").await;
    for plate in ["FIRST1", "SECOND2"] {
        let movement = json!({"spot_number": "C3", "license_plate": plate});
        let (status, _) =
            json_call(svc.occupancy, "POST", "/api/vehicle-entries", Some(movement.clone())).await;
        assert_eq!(status, 200);
        svc.clock.advance(chrono::Duration::minutes(10));
        let (status, _) = json_call(svc.occupancy, "POST", "/api/vehicle-exits", Some(movement)).await;
        assert_eq!(status, 200);
    }

    let (status, records) = json_call(svc.occupancy, "GET", "/api/vehicle-exits/C3", None).await;
    assert_eq!(status, 200);
    let records = records.as_array().expect("array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["license_plate"], "FIRST1");
    assert_eq!(records[0]["entry_time"], "19-10-2026 08:30:00");
    assert_eq!(records[0]["exit_time"], "19-10-2026 08:40:00");
}

#[tokio::test]
async fn registry_labels_are_entered_exactly_as_stored() {
    let svc = spawn_services().await;
    let padded = create_spot(&svc, "A1 ", "yes").await;
    let long_label = "L".repeat(65);
    let long = create_spot(&svc, &long_label, "yes").await;

    let (status, entry) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-entries",
        Some(json!({"spot_number": "A1 ", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 200, "padded label entry: {entry}");
    assert_eq!(entry["spot_number"], "A1 ");
    assert_eq!(spot_flag(&svc, padded).await, "no");

    let long_plate = "P".repeat(40);
    let (status, entry) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-entries",
        Some(json!({"spot_number": long_label.as_str(), "license_plate": long_plate.as_str()})),
    )
    .await;
    assert_eq!(status, 200, "long label entry: {entry}");
    assert_eq!(entry["license_plate"], long_plate.as_str());
    assert_eq!(spot_flag(&svc, long).await, "no");

    let (status, _) = json_call(
        svc.occupancy,
        "POST",
        "/api/vehicle-exits",
        Some(json!({"spot_number": "A1", "license_plate": "XYZ123"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(spot_flag(&svc, padded).await, "no");
}

#[tokio::test]
async fn spot_type_is_stored_as_supplied() {
    let svc = spawn_services().await;
    let long_type = "t".repeat(65);
    for spot_type in [" ev ", "  ", long_type.as_str()] {
        let (status, spot) = json_call(
            svc.spots,
            "POST",
            "/api/parking-spots",
            Some(json!({"spot_number": "F1", "type": spot_type, "is_available": "yes"})),
        )
        .await;
        assert_eq!(status, 200, "create with type {spot_type:?}: {spot}");
        assert_eq!(spot["type"], spot_type);
    }
}

#[tokio::test]
async fn spot_registry_crud_contract() {
    let svc = spawn_services().await;
    let first = create_spot(&svc, "D4", "yes").await;
    let second = create_spot(&svc, "D5", "no").await;

    let (status, all) = json_call(svc.spots, "GET", "/api/parking-spots/all", None).await;
    assert_eq!(status, 200);
    assert_eq!(
        all,
        json!([
            {"id": first, "spot_number": "D4", "type": "compact", "is_available": "yes"},
            {"id": second, "spot_number": "D5", "type": "compact", "is_available": "no"}
        ])
    );

    let (status, updated) = json_call(
        svc.spots,
        "PUT",
        &format!("/api/parking-spots/{first}"),
        Some(json!({"id": 999, "spot_number": "D4", "type": "ev", "is_available": "no"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        updated,
        json!({"id": first, "spot_number": "D4", "type": "ev", "is_available": "no"})
    );

    let (status, _) = json_call(
        svc.spots,
        "PUT",
        "/api/parking-spots/4242",
        Some(json!({"spot_number": "X", "type": "ev", "is_available": "yes"})),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = json_call(
        svc.spots,
        "POST",
        "/api/parking-spots",
        Some(json!({"spot_number": "E1", "type": "", "is_available": "yes"})),
    )
    .await;
    assert_eq!(status, 400);

    let (status, deleted) =
        json_call(svc.spots, "DELETE", &format!("/api/parking-spots/{second}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(
        deleted,
        json!({"message": "Parking spot has been deleted successfully."})
    );
    let (status, _) = json_call(svc.spots, "GET", &format!("/api/parking-spots/{second}"), None).await;
    assert_eq!(status, 404);
    let (status, _) =
        json_call(svc.spots, "DELETE", &format!("/api/parking-spots/{second}"), None).await;
    assert_eq!(status, 404);
    let (status, _) = json_call(svc.spots, "GET", "/api/parking-spots/not-a-number", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn json_clients_get_error_envelope_and_request_ids_are_echoed() {
    let svc = spawn_services().await;
    let (status, head, body) = send_raw(
        svc.spots,
        "GET",
        "/api/parking-spots/77",
        &[("Accept", "application/json"), ("X-Request-Id", "req-test-1")],
        None,
    )
    .await;
    assert_eq!(status, 404);
    assert!(head.contains("x-request-id: req-test-1"));
    let json: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(json["error"]["code"], "NotFound");
    assert_eq!(json["error"]["message"], "Parking spot not found");

    let (status, head, body) = send_raw(
        svc.occupancy,
        "GET",
        "/healthz",
        &[("X-Correlation-Id", "corr-7"), ("X-Request-Id", "bad id")],
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
    assert!(head.contains("x-request-id: req-0"));
    assert!(head.contains("x-correlation-id: corr-7"));
}
