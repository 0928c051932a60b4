mod support;

use flipbook::{FlipbookError, TemplateRegistry};
use support::{frame_color, strip_template};

#[test]
fn duplicate_register_returns_false_and_keeps_first() {
    let mut registry = TemplateRegistry::new();
    assert!(registry.register("walk", strip_template("walk", 4, 16, 16)));
    assert!(!registry.register("walk", strip_template("walk", 6, 8, 8)));

    let kept = registry.get("walk").unwrap();
    assert_eq!(kept.frame_count(), 4);
    assert_eq!(kept.frame_size().width, 16);
}

#[test]
fn register_or_replace_overwrites() {
    let mut registry = TemplateRegistry::new();
    assert!(registry.register("walk", strip_template("walk", 4, 16, 16)));
    registry.register_or_replace("walk", strip_template("walk", 6, 8, 8));

    assert_eq!(registry.get("walk").unwrap().frame_count(), 6);
    assert_eq!(registry.len(), 1);
}

#[test]
fn get_unknown_name_is_template_not_found() {
    let registry = TemplateRegistry::new();
    let err = registry.get("nope").unwrap_err();
    assert!(matches!(err, FlipbookError::TemplateNotFound(name) if name == "nope"));
}

#[test]
fn names_snapshot_unaffected_by_later_mutation() {
    let mut registry = TemplateRegistry::new();
    registry.register("walk", strip_template("walk", 4, 8, 8));

    let snapshot = registry.names();
    registry.register("run", strip_template("run", 2, 8, 8));

    assert_eq!(snapshot, vec!["walk".to_string()]);
    let mut now = registry.names();
    now.sort();
    assert_eq!(now, vec!["run".to_string(), "walk".to_string()]);
}

#[test]
fn initialize_all_is_idempotent() {
    let mut registry = TemplateRegistry::new();
    registry.register("walk", strip_template("walk", 3, 8, 8));

    registry.initialize_all().unwrap();
    registry.initialize_all().unwrap();

    let template = registry.get("walk").unwrap();
    assert!(template.is_initialized());
    assert_eq!(template.frame(1).unwrap().pixel(0, 0).unwrap(), frame_color(1));
}
