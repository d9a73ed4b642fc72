use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::event::resolver::{HandlerTable, sync_handler, sync_typed_handler};
use crate::event::{
    Delivery, Event, EventDispatcher, ForwardedEvent, Request, ResizeEvent, get_original_event,
};
use crate::kernel::Application;
use crate::ui::{ExecutionContext, LoopbackChannel, Page, Widget, WidgetTree};

#[tokio::test]
async fn test_resize_request_end_to_end() {
    let app = Application::new();
    let page = Page::new("main");
    let edges = Arc::new(Mutex::new(None));
    let edges_clone = edges.clone();

    let mut handlers = HandlerTable::new();
    handlers.register_typed::<ResizeEvent, _>("onResize", sync_typed_handler(move |event: &ResizeEvent| {
        *edges_clone.lock().unwrap() = Some((event.bottom(), event.right()));
        Ok(())
    }));
    let panel = Widget::new("panel").with_handlers(handlers).attached_to(page.clone()).into_ref();
    let mut tree = WidgetTree::new();
    tree.insert(panel);

    let request: Request = serde_json::from_value(json!({
        "type": "event",
        "data": { "type": "resize", "target": "panel", "height": 10, "width": 20, "top": 0, "left": 5 }
    }))
    .unwrap();

    let event = app.factory().create_from_request(&request).unwrap().unwrap();
    let resize = event.as_any().downcast_ref::<ResizeEvent>().unwrap();
    assert_eq!((resize.bottom(), resize.right()), (10, 25));

    let delivery = app
        .handle_request(&request, &tree, &ExecutionContext::for_page(page))
        .await
        .unwrap();
    assert_eq!(delivery, Some(Delivery::Immediate));
    assert_eq!(*edges.lock().unwrap(), Some((10, 25)));
}

#[tokio::test]
async fn test_forwarded_event_reaches_container_with_original() {
    let page = Page::new("main");
    let ctx = ExecutionContext::for_page(page.clone());
    let origins = Arc::new(Mutex::new(Vec::new()));
    let origins_clone = origins.clone();

    let mut handlers = HandlerTable::new();
    handlers.register_untyped("select", sync_handler(move |event: &dyn Event| {
        let root = get_original_event(event);
        origins_clone.lock().unwrap().push((
            event.current_target().map(|c| c.id().to_string()),
            root.target().map(|c| c.id().to_string()),
            root.original_event().is_none(),
        ));
        Ok(())
    }));
    let container = Widget::new("container").with_handlers(handlers).attached_to(page.clone()).into_ref();
    let cell = Widget::new("cell").attached_to(page).into_ref();

    let original = Box::new(crate::event::GenericEvent::new("select", Some(cell), Some(json!({ "row": 3 }))));
    let once = Box::new(ForwardedEvent::new(original, container.clone()));
    let twice = ForwardedEvent::new(once, container);

    EventDispatcher::default().fire_event(Box::new(twice), &ctx).await.unwrap();

    let recorded = origins.lock().unwrap().clone();
    assert_eq!(recorded, vec![(Some("container".to_string()), Some("cell".to_string()), true)]);
}

#[tokio::test]
async fn test_deferred_and_echoed_events_keep_their_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    let mut handlers = HandlerTable::new();
    handlers.register_untyped("tick", sync_handler(move |event: &dyn Event| {
        let n = event.data().and_then(|d| d["n"].as_i64()).unwrap_or(-1);
        log_clone.lock().unwrap().push(n);
        Ok(())
    }));

    let page = Page::new("main");
    let clock = Widget::new("clock").with_handlers(handlers).attached_to(page.clone()).into_ref();
    let app = Application::new();
    let dispatcher = app.dispatcher();
    let mut ctx = ExecutionContext::new();

    for n in 0..5 {
        let event = app
            .factory()
            .create_from_name_and_data("onTick", Some(clock.clone()), Some(json!({ "n": n })))
            .unwrap();
        dispatcher.fire_event(event, &ctx).await.unwrap();
    }
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(page.event_queue().len().await, 5);

    dispatcher.activate(&mut ctx, page.clone()).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);

    let client = LoopbackChannel::new();
    let echoed = app
        .factory()
        .create_from_name_and_data("tick", Some(clock.clone()), Some(json!({ "n": 5 })))
        .unwrap();
    dispatcher.echo(echoed, &client);
    let direct = app
        .factory()
        .create_from_name_and_data("tick", Some(clock), Some(json!({ "n": 6 })))
        .unwrap();
    dispatcher.fire_event(direct, &ctx).await.unwrap();

    client.acknowledge_all().await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4, 6, 5]);
}
