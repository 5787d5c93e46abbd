mod actions;
mod focus;
mod panel;
mod view;


pub use actions::{WidgetAction, apply_action};
pub use panel::{PANEL_ID, Props as PanelProps, WidgetPanel};
pub use view::AccessibilityWidget;
