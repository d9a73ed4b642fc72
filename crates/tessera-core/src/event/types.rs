use std::any::{Any, TypeId};

use serde_json::Value;

use crate::event::error::WireError;
use crate::event::registry::{EventClass, FromParts};
use crate::event::scanner::ParameterScanner;
use crate::event::{Event, EventBase};
use crate::ui::ComponentRef;

// Forwards the boilerplate trait methods to a field holding the EventBase
macro_rules! event_boilerplate {
    ($($base:ident).+) => {
        fn base(&self) -> &EventBase {
            &self.$($base).+
        }

        fn base_mut(&mut self) -> &mut EventBase {
            &mut self.$($base).+
        }

        fn clone_event(&self) -> Box<dyn Event> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    };
}

fn int_field(data: Option<&Value>, field: &str) -> i32 {
    data.and_then(|d| d.get(field))
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or_default()
}

/// Event of any type without typed fields. Used for unregistered type names.
#[derive(Debug, Clone, Default)]
pub struct GenericEvent {
    base: EventBase,
}

impl GenericEvent {
    pub fn new(event_type: impl Into<String>, target: Option<ComponentRef>, data: Option<Value>) -> Self {
        Self { base: EventBase::new(event_type, target, data) }
    }

    /// Default-construct and wire from a payload; only the type is required.
    pub fn from_payload(scanner: &ParameterScanner<'_>) -> Result<Self, WireError> {
        let mut event = Self::default();
        event.base.wire(scanner)?;
        Ok(event)
    }
}

impl Event for GenericEvent {
    event_boilerplate!(base);
}

/// A component changed size or position.
#[derive(Debug, Clone)]
pub struct ResizeEvent {
    base: EventBase,
    pub height: i32,
    pub width: i32,
    pub top: i32,
    pub left: i32,
}

impl Default for ResizeEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::EVENT_TYPE, None, None),
            height: 0,
            width: 0,
            top: 0,
            left: 0,
        }
    }
}

impl ResizeEvent {
    /// Bottom edge. Widened so client-supplied geometry cannot overflow.
    pub fn bottom(&self) -> i64 {
        i64::from(self.top) + i64::from(self.height)
    }

    /// Right edge, widened like [`bottom`](Self::bottom).
    pub fn right(&self) -> i64 {
        i64::from(self.left) + i64::from(self.width)
    }
}

impl EventClass for ResizeEvent {
    const EVENT_TYPE: &'static str = "resize";

    fn wire(&mut self, scanner: &ParameterScanner<'_>) -> Result<(), WireError> {
        self.base.wire(scanner)?;
        self.height = scanner.required("height")?;
        self.width = scanner.required("width")?;
        self.top = scanner.optional_or_default("top")?;
        self.left = scanner.optional_or_default("left")?;
        Ok(())
    }
}

impl FromParts for ResizeEvent {
    fn from_parts(target: Option<ComponentRef>, data: Option<Value>) -> Self {
        Self {
            height: int_field(data.as_ref(), "height"),
            width: int_field(data.as_ref(), "width"),
            top: int_field(data.as_ref(), "top"),
            left: int_field(data.as_ref(), "left"),
            base: EventBase::new(Self::EVENT_TYPE, target, data),
        }
    }
}

impl Event for ResizeEvent {
    event_boilerplate!(base);
}

/// Pointer event with a position and optional button/modifier state.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    base: EventBase,
    pub x: i32,
    pub y: i32,
    pub button: u8,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
}

impl Default for MouseEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::EVENT_TYPE, None, None),
            x: 0,
            y: 0,
            button: 0,
            alt_key: false,
            ctrl_key: false,
            shift_key: false,
            meta_key: false,
        }
    }
}

impl EventClass for MouseEvent {
    const EVENT_TYPE: &'static str = "mouse";

    fn wire(&mut self, scanner: &ParameterScanner<'_>) -> Result<(), WireError> {
        self.base.wire(scanner)?;
        self.x = scanner.required("x")?;
        self.y = scanner.required("y")?;
        self.button = scanner.optional_or_default("button")?;
        self.alt_key = scanner.optional_or_default("altKey")?;
        self.ctrl_key = scanner.optional_or_default("ctrlKey")?;
        self.shift_key = scanner.optional_or_default("shiftKey")?;
        self.meta_key = scanner.optional_or_default("metaKey")?;
        Ok(())
    }
}

impl Event for MouseEvent {
    event_boilerplate!(base);
}

/// A mouse click. Falls back to [`MouseEvent`] when the click count is missing.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    mouse: MouseEvent,
    pub click_count: u32,
}

impl Default for ClickEvent {
    fn default() -> Self {
        let mut mouse = MouseEvent::default();
        mouse.base = EventBase::new(Self::EVENT_TYPE, None, None);
        Self { mouse, click_count: 1 }
    }
}

impl ClickEvent {
    pub fn mouse(&self) -> &MouseEvent {
        &self.mouse
    }

    pub fn is_double_click(&self) -> bool {
        self.click_count == 2
    }
}

impl EventClass for ClickEvent {
    const EVENT_TYPE: &'static str = "click";
    const PARENT: Option<&'static str> = Some(MouseEvent::EVENT_TYPE);

    fn wire(&mut self, scanner: &ParameterScanner<'_>) -> Result<(), WireError> {
        self.mouse.wire(scanner)?;
        self.click_count = scanner.required("clickCount")?;
        Ok(())
    }
}

impl Event for ClickEvent {
    event_boilerplate!(mouse.base);

    fn view_as(&self, type_id: TypeId) -> Option<&dyn Any> {
        if type_id == TypeId::of::<Self>() {
            Some(self)
        } else {
            self.mouse.view_as(type_id)
        }
    }
}

/// A value-holding component reported a new value.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    base: EventBase,
    pub value: Value,
}

impl Default for ChangeEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::EVENT_TYPE, None, None),
            value: Value::Null,
        }
    }
}

impl EventClass for ChangeEvent {
    const EVENT_TYPE: &'static str = "change";

    fn wire(&mut self, scanner: &ParameterScanner<'_>) -> Result<(), WireError> {
        self.base.wire(scanner)?;
        self.value = scanner.required("value")?;
        Ok(())
    }
}

impl FromParts for ChangeEvent {
    /// A payload carrying a `value` key contributes that value; any other payload is the value.
    fn from_parts(target: Option<ComponentRef>, data: Option<Value>) -> Self {
        let value = match &data {
            Some(Value::Object(map)) if map.contains_key("value") => map["value"].clone(),
            Some(other) => other.clone(),
            None => Value::Null,
        };
        Self {
            base: EventBase::new(Self::EVENT_TYPE, target, data),
            value,
        }
    }
}

impl Event for ChangeEvent {
    event_boilerplate!(base);
}

/// An event re-dispatched through another component.
///
/// Keeps the original's type, target and payload; only the current target
/// moves. The original is owned, so a chain of forwards is always finite.
#[derive(Debug, Clone)]
pub struct ForwardedEvent {
    base: EventBase,
    original: Box<dyn Event>,
}

impl ForwardedEvent {
    pub fn new(original: Box<dyn Event>, via: ComponentRef) -> Self {
        let mut base = EventBase::new(
            original.event_type(),
            original.target().cloned(),
            original.data().cloned(),
        );
        base.set_current_target(Some(via));
        Self { base, original }
    }

    pub fn into_original(self) -> Box<dyn Event> {
        self.original
    }
}

impl Event for ForwardedEvent {
    event_boilerplate!(base);

    fn original_event(&self) -> Option<&dyn Event> {
        Some(self.original.as_ref())
    }
}
