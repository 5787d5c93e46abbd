pub mod chat_panel;
pub mod stepper;
pub mod switch_row;
pub mod widget;

pub use chat_panel::ChatPanel;
pub use stepper::Stepper;
pub use switch_row::SwitchRow;
pub use widget::AccessibilityWidget;
