use crate::ui::{ExecutionContext, Page};

#[test]
fn test_new_context_has_no_active_page() {
    let ctx = ExecutionContext::new();
    assert!(ctx.active_page().is_none());
    assert!(!ctx.is_active(&Page::new("main")));
}

#[test]
fn test_activate_and_deactivate() {
    let first = Page::new("first");
    let second = Page::new("second");
    let mut ctx = ExecutionContext::for_page(first.clone());
    assert!(ctx.is_active(&first));

    let previous = ctx.activate(second.clone());
    assert_eq!(previous.map(|p| p.id().to_string()), Some("first".to_string()));
    assert!(ctx.is_active(&second));
    assert!(!ctx.is_active(&first));

    assert_eq!(ctx.deactivate().map(|p| p.id().to_string()), Some("second".to_string()));
    assert!(ctx.active_page().is_none());
}

#[test]
fn test_contexts_are_independent() {
    let page = Page::new("main");
    let active = ExecutionContext::for_page(page.clone());
    let mut other = active.clone();
    other.deactivate();

    assert!(active.is_active(&page));
    assert!(!other.is_active(&page));
}
