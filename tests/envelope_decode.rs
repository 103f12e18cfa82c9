//! Purpose: End-to-end coverage for envelope decoding through the public API.
//! Exports: Integration tests only.
//! Role: Verify the documented decode branch order and accessor contracts.
//! Invariants: Tests exercise only `lantern::api`, never internal modules.
//! Invariants: Wire fixtures mirror the shapes the backend actually emits.

use lantern::api::{Envelope, ErrorKind, OptionsBag, Payload};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
struct Account {
    id: String,
    name: Option<String>,
}

fn account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        name: None,
    }
}

#[test]
fn paginated_response_decodes_to_list_payload() {
    let raw = json!({
        "apiVersion": "1.0",
        "data": {
            "items": [
                {"id": "u1", "name": "Ada"},
                {"id": "u2"}
            ],
            "totalItems": 42,
            "options": {"category": {"slug": "staff"}}
        }
    });

    let envelope = Envelope::<Account>::decode(&raw).expect("decode");
    assert_eq!(envelope.api_version(), Some("1.0"));
    assert!(!envelope.has_error());
    match envelope.payload().expect("payload") {
        Payload::List {
            items,
            total_items,
            options,
        } => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].name.as_deref(), Some("Ada"));
            assert_eq!(*total_items, 42);
            assert!(options.is_some());
        }
        Payload::Single { .. } => panic!("expected list payload"),
    }
    assert_eq!(
        envelope.options_category().expect("category"),
        &json!({"slug": "staff"})
    );
}

#[test]
fn detail_response_decodes_to_single_payload() {
    let raw = json!({"data": {"id": "u1", "name": "Ada"}});
    let envelope = Envelope::<Account>::decode(&raw).expect("decode");
    match envelope.into_payload().expect("payload") {
        Payload::Single { detail, options } => {
            assert_eq!(detail.id, "u1");
            assert_eq!(detail.name.as_deref(), Some("Ada"));
            assert!(options.is_none());
        }
        Payload::List { .. } => panic!("expected single payload"),
    }
}

#[test]
fn backend_error_shadows_any_data_field() {
    let raw = json!({
        "error": {"message": "bad", "code": "E1"},
        "data": {"items": []}
    });
    let envelope = Envelope::<Account>::decode(&raw).expect("decode");
    let error = envelope.error().expect("error info");
    assert_eq!(error.message, "bad");
    assert_eq!(error.code, "E1");
    assert!(envelope.payload().is_none());
}

#[test]
fn responses_without_error_or_data_are_unusable() {
    let err = Envelope::<Account>::decode(&json!({})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingPayload);
}

#[test]
fn list_without_total_items_fails_instead_of_defaulting() {
    let raw = json!({"data": {"items": [{"id": "u1"}]}});
    let err = Envelope::<Account>::decode(&raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(err.field(), Some("data.totalItems"));
}

#[test]
fn mistyped_item_aborts_the_whole_decode() {
    let raw = json!({"data": {"items": [{"id": 7}], "totalItems": 1}});
    let err = Envelope::<Account>::decode(&raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(err.field(), Some("data.items"));
}

#[test]
fn decode_slice_accepts_raw_transport_bytes() {
    let body = br#"{"data":{"items":[{"id":"u1"}],"totalItems":1}}"#;
    let envelope = Envelope::<Account>::decode_slice(body).expect("decode");
    match envelope.payload().expect("payload") {
        Payload::List { items, .. } => assert_eq!(items, &vec![account("u1")]),
        Payload::Single { .. } => panic!("expected list payload"),
    }
}

#[test]
fn constructed_envelopes_round_trip_the_wire_shape() {
    let mut options = serde_json::Map::new();
    options.insert("user".to_string(), json!({"id": "u1"}));
    let envelope = Envelope::list(vec![account("u1")], 7, Some(OptionsBag::from(options)))
        .with_api_version("1.0");

    let wire = envelope.to_value().expect("encode");
    let again = Envelope::<Account>::decode(&wire).expect("decode");
    assert_eq!(again, envelope);
    assert_eq!(again.options_user().expect("user"), &json!({"id": "u1"}));

    let single = Envelope::single(account("u2"), None);
    let wire = single.to_value().expect("encode");
    assert_eq!(wire, json!({"data": {"id": "u2", "name": null}}));
    let again = Envelope::<Account>::decode(&wire).expect("decode");
    assert_eq!(again, single);
}

#[test]
fn options_lookups_fail_loudly_when_absent() {
    let raw = json!({"data": {"items": [], "totalItems": 0}});
    let envelope = Envelope::<Account>::decode(&raw).expect("decode");

    for (lookup, key) in [
        (envelope.options_user(), "user"),
        (envelope.options_group(), "group"),
        (envelope.options_category(), "category"),
    ] {
        let err = lookup.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingOption);
        assert_eq!(err.key(), Some(key));
    }
}
