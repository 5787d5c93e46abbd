//! Language signal shared between independently mounted components.
//!
//! The widget publishes; anything that renders localized text subscribes and
//! is called synchronously on change. The value is also mirrored into a root
//! attribute so scripts outside the widget can read it.

use crate::language::Language;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Root-element attribute mirroring the active language.
pub const LANGUAGE_ATTRIBUTE: &str = "data-a11y-lang";

type Listener = Rc<dyn Fn(Language)>;

struct SignalInner {
    current: Cell<Language>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

/// Cheap to clone; clones share subscribers and value.
#[derive(Clone)]
pub struct LanguageSignal {
    inner: Rc<SignalInner>,
}

impl Default for LanguageSignal {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl fmt::Debug for LanguageSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageSignal")
            .field("current", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl PartialEq for LanguageSignal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl LanguageSignal {
    #[must_use]
    pub fn new(initial: Language) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                current: Cell::new(initial),
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn get(&self) -> Language {
        self.inner.current.get()
    }

    /// Store `language` and notify subscribers if it changed.
    pub fn publish(&self, language: Language) {
        if self.inner.current.replace(language) == language {
            return;
        }
        // Listeners may subscribe or drop subscriptions while being called.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(language);
        }
    }

    /// Register `listener`; it stays registered until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(Language) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            signal: Rc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// Guard returned by [`LanguageSignal::subscribe`].
pub struct Subscription {
    id: u64,
    signal: Weak<SignalInner>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Resolve the language without a subscription: root attribute first, then
/// the persisted code, then the default. Unrecognized values are skipped.
#[must_use]
pub fn resolve_language(attribute: Option<&str>, persisted: Option<&str>) -> Language {
    attribute
        .and_then(Language::from_code)
        .or_else(|| persisted.and_then(Language::from_code))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_changes_until_dropped() {
        let signal = LanguageSignal::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = Rc::clone(&seen);
            signal.subscribe(move |lang| seen.borrow_mut().push(lang))
        };
        signal.publish(Language::Es);
        signal.publish(Language::Es);
        drop(sub);
        signal.publish(Language::En);
        assert_eq!(*seen.borrow(), vec![Language::Es]);
        assert_eq!(signal.subscriber_count(), 0);
        assert_eq!(signal.get(), Language::En);
    }

    #[test]
    fn clones_share_state() {
        let signal = LanguageSignal::new(Language::Es);
        let other = signal.clone();
        other.publish(Language::En);
        assert_eq!(signal.get(), Language::En);
        assert_eq!(signal, other);
        assert_ne!(signal, LanguageSignal::default());
    }

    #[test]
    fn listener_may_unsubscribe_itself() {
        let signal = LanguageSignal::default();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let sub = {
            let slot = Rc::clone(&slot);
            signal.subscribe(move |_| {
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(sub);
        signal.publish(Language::Es);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn resolution_prefers_attribute_then_storage() {
        assert_eq!(resolve_language(Some("es"), Some("en")), Language::Es);
        assert_eq!(resolve_language(Some("de"), Some("es")), Language::Es);
        assert_eq!(resolve_language(None, Some("fr")), Language::En);
        assert_eq!(resolve_language(None, None), Language::En);
    }
}
