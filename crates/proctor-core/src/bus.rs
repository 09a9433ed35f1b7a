//! Synchronous one-to-many notification of exam lifecycle events.
//!
//! The bus owns an ordered registry of observers. `publish` delivers on the
//! caller's thread, in subscription order, and isolates each delivery: one
//! observer failing is logged and skipped, the rest are still notified.

use std::fmt;

use crate::exam::Exam;

/// Payload delivered to observers when an exam starts.
///
/// The exam reference is read-only; observers hold no authority to mutate
/// it. At delivery time the exam still shows its pre-transition state.
#[derive(Debug, Clone, Copy)]
pub struct ExamEvent<'a> {
    /// Human-readable event message.
    pub message: &'a str,
    /// The exam the event describes.
    pub exam: &'a Exam,
}

/// A party interested in exam lifecycle events.
pub trait ExamObserver {
    /// Identifies the observer in delivery warnings.
    fn name(&self) -> &str;

    /// Called when an exam is starting.
    fn on_exam_starting(&self, event: &ExamEvent<'_>) -> anyhow::Result<()>;
}

/// Handle returned by [`NotificationBus::subscribe`], usable to
/// unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Ordered registry of exam observers.
#[derive(Default)]
pub struct NotificationBus {
    observers: Vec<(SubscriptionId, Box<dyn ExamObserver>)>,
    next_id: u64,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer; registration order is delivery order.
    pub fn subscribe(&mut self, observer: Box<dyn ExamObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a registration. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers `event` to every observer once, in subscription order.
    ///
    /// A failing observer is warned about and skipped; it never blocks
    /// delivery to the observers after it.
    pub fn publish(&self, event: &ExamEvent<'_>) {
        for (_, observer) in &self.observers {
            if let Err(error) = observer.on_exam_starting(event) {
                tracing::warn!(
                    observer = observer.name(),
                    error = format!("{error:#}"),
                    "observer failed, continuing delivery"
                );
            }
        }
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .observers
            .iter()
            .map(|(_, observer)| observer.name())
            .collect();
        f.debug_struct("NotificationBus")
            .field("observers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionCatalog;
    use crate::model::{ExamKind, Subject};
    use crate::traits::MemorySink;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    struct Recorder {
        name: String,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl ExamObserver for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_exam_starting(&self, event: &ExamEvent<'_>) -> anyhow::Result<()> {
            self.seen
                .borrow_mut()
                .push(format!("{}: {}", self.name, event.message));
            Ok(())
        }
    }

    struct Faulty;

    impl ExamObserver for Faulty {
        fn name(&self) -> &str {
            "faulty"
        }

        fn on_exam_starting(&self, _event: &ExamEvent<'_>) -> anyhow::Result<()> {
            anyhow::bail!("observer broke")
        }
    }

    fn sample_exam() -> Exam {
        Exam::new(
            "Midterm Practice",
            Subject::new("Advanced Mathematics", "MATH301", 3),
            Duration::from_secs(60 * 60),
            ExamKind::Practice,
            QuestionCatalog::new(Box::new(MemorySink::new())),
        )
    }

    #[test]
    fn publish_delivers_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = NotificationBus::new();
        bus.subscribe(Box::new(Recorder {
            name: "first".into(),
            seen: Rc::clone(&seen),
        }));
        bus.subscribe(Box::new(Recorder {
            name: "second".into(),
            seen: Rc::clone(&seen),
        }));

        let exam = sample_exam();
        bus.publish(&ExamEvent {
            message: "hello",
            exam: &exam,
        });

        assert_eq!(*seen.borrow(), ["first: hello", "second: hello"]);
    }

    #[test]
    fn a_failing_observer_does_not_block_the_rest() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = NotificationBus::new();
        bus.subscribe(Box::new(Faulty));
        bus.subscribe(Box::new(Recorder {
            name: "after".into(),
            seen: Rc::clone(&seen),
        }));

        let exam = sample_exam();
        bus.publish(&ExamEvent {
            message: "still delivered",
            exam: &exam,
        });

        assert_eq!(*seen.borrow(), ["after: still delivered"]);
    }

    #[test]
    fn unsubscribe_removes_a_registration() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = NotificationBus::new();
        let id = bus.subscribe(Box::new(Recorder {
            name: "gone".into(),
            seen: Rc::clone(&seen),
        }));
        bus.subscribe(Box::new(Recorder {
            name: "kept".into(),
            seen: Rc::clone(&seen),
        }));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id), "second removal finds nothing");
        assert_eq!(bus.subscriber_count(), 1);

        let exam = sample_exam();
        bus.publish(&ExamEvent {
            message: "ping",
            exam: &exam,
        });
        assert_eq!(*seen.borrow(), ["kept: ping"]);
    }

    #[test]
    fn publishing_to_nobody_is_fine() {
        let bus = NotificationBus::new();
        let exam = sample_exam();
        bus.publish(&ExamEvent {
            message: "unheard",
            exam: &exam,
        });
    }
}
