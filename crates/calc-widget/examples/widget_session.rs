//! Widget Session Demo
//!
//! Drives the widget on the mock host page through the same events the
//! browser listeners produce, printing what the page and the parent frame see.
//!
//! Run with: cargo run --example widget_session

use calc_widget::prelude::*;
use serde_json::json;

fn show(widget: &Widget<MockDom, RecordingPort>) {
    let dom = widget.surface();
    println!(
        "   title={:?} display={:?} dark={} menu_open={}",
        dom.title().unwrap_or_default(),
        dom.display_text().unwrap_or("-"),
        dom.is_dark(),
        dom.is_menu_open()
    );
}

fn main() -> Result<(), WidgetError> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Calc Widget Demo - Mock Host Page Session           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut widget = Widget::new(
        MockDom::host_page(),
        RecordingPort::new(),
        &WidgetConfig::default(),
    );

    println!("1️⃣  Load");
    widget.handle_event(WidgetEvent::Load)?;
    show(&widget);

    println!("\n2️⃣  Keypad: 2 ** 3 calculate");
    for key in ["2", "**", "3", "calculate"] {
        widget.handle_event(WidgetEvent::KeyPress(key.to_string()))?;
    }
    show(&widget);

    println!("\n3️⃣  Keypad: clear, 6 / 0 calculate");
    for key in ["clear", "6", "/", "0", "calculate"] {
        widget.handle_event(WidgetEvent::KeyPress(key.to_string()))?;
    }
    show(&widget);

    println!("\n4️⃣  Keypad: clear, 2 + calculate (malformed)");
    for key in ["clear", "2", "+", "calculate"] {
        widget.handle_event(WidgetEvent::KeyPress(key.to_string()))?;
    }
    show(&widget);

    println!("\n5️⃣  Menu, then navigate to About");
    widget.handle_event(WidgetEvent::ToggleMenu)?;
    show(&widget);
    widget.handle_event(WidgetEvent::NavigateTo("About".into()))?;
    show(&widget);

    println!("\n6️⃣  Parent asks for dark theme and current height");
    widget.handle_event(WidgetEvent::HostMessage(
        json!({"action": "setTheme", "theme": "dark"}),
    ))?;
    widget.handle_event(WidgetEvent::HostMessage(json!("requestHeight")))?;
    show(&widget);

    println!("\n7️⃣  Unknown view (ignored)");
    widget.handle_event(WidgetEvent::NavigateTo("Settings".into()))?;
    show(&widget);

    println!("\n📨 Messages posted to the parent frame:");
    for (i, report) in widget.port().sent().iter().enumerate() {
        let wire = serde_json::to_string(report).unwrap_or_default();
        println!("   [{i}] {wire}");
    }

    Ok(())
}
