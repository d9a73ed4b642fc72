use std::sync::Arc;

use serde_json::json;

use crate::event::error::EventSystemError;
use crate::event::factory::{EventFactory, Request};
use crate::event::registry::{EventDescriptor, EventTypeRegistry};
use crate::event::types::{ChangeEvent, ClickEvent, GenericEvent, MouseEvent, ResizeEvent};
use crate::kernel::error::Error;
use crate::tests::integration::common::{RecordingComponent, as_ref};
use crate::ui::WidgetTree;

fn factory() -> EventFactory {
    EventFactory::new(Arc::new(EventTypeRegistry::with_builtin_events()))
}

fn assert_invalid_request(result: crate::kernel::error::Result<Option<Box<dyn crate::event::Event>>>) {
    match result {
        Err(Error::EventSystem(EventSystemError::InvalidRequest { .. })) => {}
        other => panic!("expected InvalidRequest, got {:?}", other),
    }
}

#[test]
fn test_create_from_name_unknown_type_is_generic() {
    let button = RecordingComponent::detached("button");
    let event = factory()
        .create_from_name_and_data("onHover", Some(as_ref(&button)), Some(json!({ "x": 1 })))
        .unwrap();

    assert_eq!(event.event_type(), "hover");
    assert!(event.as_any().downcast_ref::<GenericEvent>().is_some());
    assert_eq!(event.target().map(|t| t.id()), Some("button"));
    assert_eq!(event.data(), Some(&json!({ "x": 1 })));
}

#[test]
fn test_create_from_name_uses_default_constructor() {
    let event = factory().create_from_name_and_data("mouse", None, None).unwrap();
    assert!(event.as_any().downcast_ref::<MouseEvent>().is_some());
    assert!(event.target().is_none());
    assert!(event.data().is_none());
}

#[test]
fn test_create_from_name_uses_parts_constructor() {
    let event = factory()
        .create_from_name_and_data("onResize", None, Some(json!({ "height": 10, "width": 20, "left": 5 })))
        .unwrap();
    let resize = event.as_any().downcast_ref::<ResizeEvent>().expect("should be a ResizeEvent");
    assert_eq!(resize.right(), 25);
    assert_eq!(resize.bottom(), 10);
}

#[test]
fn test_create_from_name_missing_parts_constructor_is_configuration_error() {
    let result = factory().create_from_name_and_data("click", None, Some(json!({ "x": 1 })));
    match result {
        Err(Error::EventSystem(EventSystemError::Configuration { event_type, .. })) => {
            assert_eq!(event_type, "click");
        }
        other => panic!("expected Configuration error, got {:?}", other),
    }
}

#[test]
fn test_create_from_name_missing_default_constructor_is_configuration_error() {
    let mut registry = EventTypeRegistry::new();
    registry.register(EventDescriptor::parts_only::<ChangeEvent>()).unwrap();
    let factory = EventFactory::new(Arc::new(registry));

    assert!(factory.create_from_name_and_data("change", None, None).is_err());
    let event = factory.create_from_name_and_data("change", None, Some(json!("x"))).unwrap();
    assert_eq!(event.as_any().downcast_ref::<ChangeEvent>().unwrap().value, json!("x"));
}

#[test]
fn test_create_from_request_registered_type() {
    let request = Request::event(json!({ "type": "onResize", "height": 10, "width": 20, "top": 0, "left": 5 }));
    let event = factory().create_from_request(&request).unwrap().expect("event should decode");

    assert_eq!(event.event_type(), "resize");
    let resize = event.as_any().downcast_ref::<ResizeEvent>().unwrap();
    assert_eq!(resize.bottom(), 10);
    assert_eq!(resize.right(), 25);
    assert_eq!(event.data(), Some(&request.data));
}

#[test]
fn test_create_from_request_falls_back_to_parent_type() {
    // No clickCount: the click wiring fails and mouse takes over
    let request = Request::event(json!({ "type": "click", "x": 1, "y": 2 }));
    let event = factory().create_from_request(&request).unwrap().unwrap();

    assert!(event.as_any().downcast_ref::<ClickEvent>().is_none());
    let mouse = event.as_any().downcast_ref::<MouseEvent>().expect("should fall back to MouseEvent");
    assert_eq!((mouse.x, mouse.y), (1, 2));
    assert_eq!(event.event_type(), "click");
}

#[test]
fn test_create_from_request_falls_back_to_generic() {
    let request = Request::event(json!({ "type": "resize", "height": "tall" }));
    let event = factory().create_from_request(&request).unwrap().unwrap();

    assert!(event.as_any().downcast_ref::<GenericEvent>().is_some());
    assert_eq!(event.event_type(), "resize");
    assert_eq!(event.data(), Some(&request.data));
}

#[test]
fn test_create_from_request_unknown_type_is_generic() {
    let request = Request::event(json!({ "type": "swipe", "direction": "left" }));
    let event = factory().create_from_request(&request).unwrap().unwrap();
    assert!(event.as_any().downcast_ref::<GenericEvent>().is_some());
    assert_eq!(event.event_type(), "swipe");
}

#[test]
fn test_create_from_request_without_generic_fallback_returns_none() {
    let factory = factory().with_generic_fallback(false);
    let request = Request::event(json!({ "type": "resize", "width": 3 }));
    assert!(factory.create_from_request(&request).unwrap().is_none());

    let request = Request::event(json!({ "type": "swipe" }));
    assert!(factory.create_from_request(&request).unwrap().is_none());
}

#[test]
fn test_create_from_request_rejects_invalid_requests() {
    let factory = factory();
    assert_invalid_request(factory.create_from_request(&Request::new("ping", json!({ "type": "resize" }))));
    assert_invalid_request(factory.create_from_request(&Request::event(json!(["resize"]))));
    assert_invalid_request(factory.create_from_request(&Request::event(json!({ "height": 1 }))));
    assert_invalid_request(factory.create_from_request(&Request::event(json!({ "type": 7 }))));
}

#[test]
fn test_request_deserializes_from_wire() {
    let request: Request = serde_json::from_str(r#"{"type":"event","data":{"type":"load"}}"#).unwrap();
    assert!(request.is_event());
    assert_eq!(request.event_payload().unwrap().get("type"), Some(&json!("load")));

    let request: Request = serde_json::from_str(r#"{"type":"event"}"#).unwrap();
    assert!(request.data.is_null());
    assert!(request.event_payload().is_err());
}

#[test]
fn test_create_from_request_in_binds_target() {
    let panel = RecordingComponent::detached("panel");
    let mut tree = WidgetTree::new();
    tree.insert(as_ref(&panel));

    let request = Request::event(json!({ "type": "load", "target": "panel" }));
    let event = factory().create_from_request_in(&request, &tree).unwrap().unwrap();
    assert_eq!(event.target().map(|t| t.id()), Some("panel"));
    assert_eq!(event.current_target().map(|t| t.id()), Some("panel"));

    let request = Request::event(json!({ "type": "load", "target": "missing" }));
    let event = factory().create_from_request_in(&request, &tree).unwrap().unwrap();
    assert!(event.target().is_none());
}

#[test]
fn test_type_name_of_registered_type() {
    let factory = factory();
    assert_eq!(factory.type_name_of::<ChangeEvent>(), Some("change"));
    assert_eq!(factory.type_name_of::<GenericEvent>(), None);
    assert_eq!(factory.registry().len(), 4);
}

#[test]
fn test_create_from_request_with_extreme_geometry() {
    let request = Request::event(json!({
        "type": "resize", "height": i32::MAX, "width": i32::MAX, "top": 1, "left": 1
    }));
    let event = factory().create_from_request(&request).unwrap().unwrap();
    let resize = event.as_any().downcast_ref::<ResizeEvent>().unwrap();
    assert_eq!(resize.bottom(), 2_147_483_648);
    assert_eq!(resize.right(), 2_147_483_648);
}
