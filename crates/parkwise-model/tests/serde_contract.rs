use parkwise_model::{Availability, NewParkingSpot, ParkingSpot, SpotId};
use serde_json::{json, Value};

#[test]
fn parking_spot_wire_shape_uses_type_and_yes_no() {
    let spot = NewParkingSpot::new("A1", "compact", Availability::Available)
        .expect("spot")
        .with_id(SpotId::new(7));
    let value = serde_json::to_value(&spot).expect("serialize spot");
    assert_eq!(
        value,
        json!({"id": 7, "spot_number": "A1", "type": "compact", "is_available": "yes"})
    );
}

#[test]
fn parking_spot_decodes_from_wire_shape() {
    let spot: ParkingSpot = serde_json::from_value(
        json!({"id": 3, "spot_number": "B2", "type": "ev", "is_available": "no"}),
    )
    .expect("decode spot");
    assert_eq!(spot.id, SpotId::new(3));
    assert_eq!(spot.is_available, Availability::Occupied);
}

#[test]
fn availability_rejects_unknown_wire_values() {
    let err = serde_json::from_value::<Availability>(Value::String("maybe".to_string()));
    assert!(err.is_err());
}
