mod support;

use flipbook::{FlipbookError, TemplateRegistry};
use support::{frame_color, registry_with};

#[test]
fn catalog_round_trip_requires_initialize_all() {
    let registry = registry_with("walk", 4, 8, 8);
    let blob = registry.to_json().unwrap();

    let mut loaded = TemplateRegistry::from_json(&blob).unwrap();
    assert_eq!(loaded.len(), 1);

    let template = loaded.get("walk").unwrap();
    assert!(!template.is_initialized());
    assert_eq!(template.frame_count(), 4);
    assert!(template.frame(0).is_none());

    loaded.initialize_all().unwrap();
    let template = loaded.get("walk").unwrap();
    assert!(template.is_initialized());
    for i in 0..4 {
        assert_eq!(template.frame(i).unwrap().pixel(0, 0).unwrap(), frame_color(i));
    }

    // Retry is safe once materialized.
    loaded.initialize_all().unwrap();
    assert!(loaded.get("walk").unwrap().is_initialized());
}

#[test]
fn malformed_blob_is_persistence_error() {
    let err = TemplateRegistry::from_json("{not json").unwrap_err();
    assert!(matches!(err, FlipbookError::Persistence(_)));
}

#[test]
fn failed_initialize_leaves_no_template_partially_initialized() {
    let registry = registry_with("good", 2, 8, 8);
    let mut blob: serde_json::Value =
        serde_json::from_str(&registry.to_json().unwrap()).unwrap();
    blob["templates"]["bad"] = serde_json::json!({
        "name": "bad",
        "frame_size": { "width": 8, "height": 8 },
        "layout": { "Strip": { "frame_count": 2 } },
        "encoded": [1, 2, 3],
    });

    let mut loaded = TemplateRegistry::from_json(&blob.to_string()).unwrap();
    assert_eq!(loaded.len(), 2);

    let err = loaded.initialize_all().unwrap_err();
    assert!(matches!(err, FlipbookError::Decode(_)));

    // All-or-nothing: the good template was not committed either, so a
    // retry starts from the same consistent state.
    assert!(!loaded.get("good").unwrap().is_initialized());
    assert!(!loaded.get("bad").unwrap().is_initialized());
}
