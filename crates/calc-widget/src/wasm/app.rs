//! Page wiring and the JavaScript entry points
//!
//! One delegated click listener on the document routes `data-view`,
//! `data-key`, `data-theme-toggle` and the menu button. A `message` listener
//! feeds the host bridge and a `ResizeObserver` on `<body>` re-posts the
//! height. All closures live in [`APP`] for the lifetime of the page.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MessageEvent, ResizeObserver};

use super::browser::{js_error, BrowserParent, BrowserSurface};
use super::logging;
use crate::config::WidgetConfig;
use crate::core::{WidgetError, WidgetResult};
use crate::widget::{Widget, WidgetEvent};

/// The widget as mounted in a real page
pub type BrowserWidget = Widget<BrowserSurface, BrowserParent>;

type SharedWidget = Rc<RefCell<BrowserWidget>>;

/// A started widget and the listeners driving it
struct App {
    widget: SharedWidget,
    _on_click: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_resize: Closure<dyn FnMut()>,
    _observer: ResizeObserver,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").finish()
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static PENDING_PRIVATE_API: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

fn to_js(err: &WidgetError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Runs one event unless the widget is already handling another
fn dispatch(widget: &SharedWidget, event: WidgetEvent) {
    match widget.try_borrow_mut() {
        // handle_event logs its own failures
        Ok(mut widget) => {
            let _ = widget.handle_event(event);
        }
        Err(_) => tracing::warn!(?event, "widget busy, event dropped"),
    }
}

/// Maps a click target to the widget event it stands for
fn click_event(target: &Element, menu_button: &str) -> Option<WidgetEvent> {
    let closest = |selector: &str| target.closest(selector).ok().flatten();

    if let Some(item) = closest("[data-view]") {
        return item.get_attribute("data-view").map(WidgetEvent::NavigateTo);
    }
    if let Some(button) = closest("[data-key]") {
        return button.get_attribute("data-key").map(WidgetEvent::KeyPress);
    }
    if closest("[data-theme-toggle]").is_some() {
        return Some(WidgetEvent::ToggleTheme);
    }
    if !menu_button.is_empty() && closest(menu_button).is_some() {
        return Some(WidgetEvent::ToggleMenu);
    }
    None
}

/// Converts `MessageEvent.data` to JSON; strings stay strings
fn message_data(data: &JsValue) -> Value {
    if let Some(text) = data.as_string() {
        return Value::String(text);
    }
    js_sys::JSON::stringify(data)
        .ok()
        .and_then(|json| json.as_string())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or(Value::Null)
}

/// Wraps a JS function as a `privateApi` handler
fn private_api_handler(callback: js_sys::Function) -> impl FnMut(&Value) + 'static {
    move |payload: &Value| {
        let arg = js_sys::JSON::parse(&payload.to_string()).unwrap_or(JsValue::NULL);
        if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
            tracing::warn!(err = %js_error(&e), "privateApi handler threw");
        }
    }
}

fn launch(config: &WidgetConfig) -> WidgetResult<()> {
    let window = web_sys::window().ok_or_else(|| WidgetError::host("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| WidgetError::host("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| WidgetError::host("document has no body"))?;

    let surface = BrowserSurface::locate(document.clone(), &config.selectors)?;
    let parent = BrowserParent::new(window.clone(), config.target_origin.as_str());
    let mut widget = Widget::new(surface, parent, config);
    if let Some(callback) = PENDING_PRIVATE_API.with(|pending| pending.borrow_mut().take()) {
        widget.register_private_api(private_api_handler(callback));
    }
    widget.start()?;
    let widget: SharedWidget = Rc::new(RefCell::new(widget));

    let on_click = {
        let widget = Rc::clone(&widget);
        let menu_button = config.selectors.menu_button.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Some(event) = click_event(&target, &menu_button) {
                dispatch(&widget, event);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| js_error(&e))?;

    let on_message = {
        let widget = Rc::clone(&widget);
        Closure::wrap(Box::new(move |event: MessageEvent| {
            dispatch(&widget, WidgetEvent::HostMessage(message_data(&event.data())));
        }) as Box<dyn FnMut(MessageEvent)>)
    };
    window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
        .map_err(|e| js_error(&e))?;

    let on_resize = {
        let widget = Rc::clone(&widget);
        Closure::wrap(Box::new(move || dispatch(&widget, WidgetEvent::Resized)) as Box<dyn FnMut()>)
    };
    let observer =
        ResizeObserver::new(on_resize.as_ref().unchecked_ref()).map_err(|e| js_error(&e))?;
    observer.observe(&body);

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            widget,
            _on_click: on_click,
            _on_message: on_message,
            _on_resize: on_resize,
            _observer: observer,
        });
    });
    Ok(())
}

fn start_with(config: &WidgetConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(config.max_level().map_err(|e| to_js(&e))?);

    if APP.with(|app| app.borrow().is_some()) {
        tracing::warn!("widget already started");
        return Ok(());
    }
    launch(config).map_err(|err| {
        tracing::error!(%err, "widget failed to start");
        to_js(&err)
    })
}

/// Starts the widget on the stock host page
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    start_with(&WidgetConfig::default())
}

/// Starts the widget with a JSON configuration object
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config = WidgetConfig::from_json(json).map_err(|e| to_js(&e))?;
    start_with(&config)
}

/// Registers the JS function receiving `privateApi` messages.
///
/// May be called before or after `start`.
#[wasm_bindgen]
pub fn register_private_api(callback: js_sys::Function) -> Result<(), JsValue> {
    let callback = APP.with(|app| match app.borrow().as_ref() {
        Some(app) => match app.widget.try_borrow_mut() {
            Ok(mut widget) => {
                widget.register_private_api(private_api_handler(callback));
                Ok(None)
            }
            Err(_) => Err(to_js(&WidgetError::host("widget busy"))),
        },
        None => Ok(Some(callback)),
    })?;

    if let Some(callback) = callback {
        PENDING_PRIVATE_API.with(|pending| *pending.borrow_mut() = Some(callback));
    }
    Ok(())
}
