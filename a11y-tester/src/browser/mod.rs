pub mod bridge;
pub mod session;

pub use bridge::{PageProbe, WidgetBridge};
pub use session::{BrowserConfig, BrowserKind, new_session};
