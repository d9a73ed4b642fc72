use crate::ui::page::{Page, PageRef};

/// The page one request-processing flow is currently working on.
///
/// Each flow owns its own context; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    active_page: Option<PageRef>,
}

impl ExecutionContext {
    /// Context with no active page
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose active page is `page`
    pub fn for_page(page: PageRef) -> Self {
        Self { active_page: Some(page) }
    }

    pub fn active_page(&self) -> Option<&PageRef> {
        self.active_page.as_ref()
    }

    pub fn is_active(&self, page: &Page) -> bool {
        self.active_page.as_deref() == Some(page)
    }

    /// Make `page` the active page, returning the previous one.
    pub fn activate(&mut self, page: PageRef) -> Option<PageRef> {
        log::debug!("Activating page '{}'", page.id());
        self.active_page.replace(page)
    }

    pub fn deactivate(&mut self) -> Option<PageRef> {
        self.active_page.take()
    }
}
