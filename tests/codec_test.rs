use scalyr_log_forwarder::codec::{self, EventRecord};
use serde_json::json;

#[test]
fn test_round_trip_nested_record() {
    let record = EventRecord::new(
        "app.web",
        1_700_000_000,
        json!({
            "message": "request handled",
            "status": 200,
            "latency_ms": 12.5,
            "tags": ["prod", "eu-west"],
            "context": {"user": null, "retries": 0}
        }),
    );

    let encoded = codec::encode(&record).unwrap();
    let decoded = codec::decode_stream(&encoded).unwrap();

    assert_eq!(decoded, vec![record]);
}

#[test]
fn test_decode_concatenated_records_in_order() {
    let records = vec![
        EventRecord::new("app", 1000, json!({"msg": "a"})),
        EventRecord::new("db", 1000, json!({"msg": "b"})),
        EventRecord::new("app", 1001, json!({"msg": "c"})),
    ];

    let mut chunk = Vec::new();
    for record in &records {
        chunk.extend_from_slice(&codec::encode(record).unwrap());
    }

    let decoded = codec::decode_stream(&chunk).unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn test_empty_buffer_decodes_to_no_records() {
    assert!(codec::decode_stream(&[]).unwrap().is_empty());
}

#[test]
fn test_non_map_record_values_survive() {
    // The codec is schema-agnostic: scalar and array payloads pass through
    for payload in [json!(null), json!(true), json!(7), json!("line"), json!([1, 2])] {
        let record = EventRecord::new("raw", 1, payload.clone());
        let encoded = codec::encode(&record).unwrap();
        let decoded = codec::decode_stream(&encoded).unwrap();
        assert_eq!(decoded[0].record, payload);
    }
}

#[test]
fn test_corrupt_trailing_record_fails_whole_buffer() {
    let good = codec::encode(&EventRecord::new("app", 1000, json!({"msg": "a"}))).unwrap();

    let mut chunk = good.to_vec();
    chunk.extend_from_slice(&[0xc1]); // reserved msgpack byte, never valid

    let result = codec::decode_stream(&chunk);
    assert!(result.is_err());
}
