//! Slide change subscribers

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Trait for components that need to respond to a committed slide change
pub trait SlideChangeSubscriber: Send + Sync {
    /// Called after every committed index change
    fn on_slide_changed(&self);
}

/// Subscriber wrapping a closure
pub struct FnSubscriber<F> {
    callback: F,
}

impl<F> FnSubscriber<F>
where
    F: Fn() + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> SlideChangeSubscriber for FnSubscriber<F>
where
    F: Fn() + Send + Sync,
{
    fn on_slide_changed(&self) {
        (self.callback)();
    }
}

/// Weakly held subscriber list
#[derive(Default)]
pub(crate) struct SubscriberList {
    subscribers: RwLock<Vec<Weak<dyn SlideChangeSubscriber>>>,
}

impl SubscriberList {
    pub(crate) fn add(&self, subscriber: &Arc<dyn SlideChangeSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(subscriber));
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Notify live subscribers, dropping dead weak references
    pub(crate) fn notify(&self) {
        let live: Vec<Arc<dyn SlideChangeSubscriber>> = {
            let mut subscribers = self.subscribers.write();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        // Lock released so a subscriber may register others
        for subscriber in live {
            subscriber.on_slide_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_live_subscribers() {
        let list = SubscriberList::default();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let subscriber: Arc<dyn SlideChangeSubscriber> = Arc::new(FnSubscriber::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        list.add(&subscriber);

        list.notify();
        list.notify();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let list = SubscriberList::default();
        let subscriber: Arc<dyn SlideChangeSubscriber> = Arc::new(FnSubscriber::new(|| {}));
        list.add(&subscriber);
        assert_eq!(list.len(), 1);

        drop(subscriber);
        list.notify();
        assert_eq!(list.len(), 0);
    }
}
