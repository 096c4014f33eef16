//! Layout metrics published by the renderer onto each node.

use std::fmt;

/// Width and optional position computed by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutMetrics {
    pub width: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl LayoutMetrics {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            x: None,
            y: None,
        }
    }

    pub fn at(width: f64, x: f64, y: f64) -> Self {
        Self {
            width,
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Handle returned by [`LayoutCell::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(Option<&LayoutMetrics>)>;

/// Single-value broadcast cell.
///
/// Holds the current metrics (`None` until the first publish). Subscribers
/// receive the current value on subscription and every published value
/// afterwards, synchronously and in subscription order.
#[derive(Default)]
pub struct LayoutCell {
    value: Option<LayoutMetrics>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl LayoutCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<LayoutMetrics> {
        self.value
    }

    /// Replaces the value wholesale and notifies every observer before returning.
    pub fn publish(&mut self, metrics: LayoutMetrics) {
        self.value = Some(metrics);
        let current = self.value.as_ref();
        for (_, observer) in self.observers.iter_mut() {
            observer(current);
        }
    }

    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(Option<&LayoutMetrics>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        observer(self.value.as_ref());
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` when the id was not subscribed (or already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for LayoutCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCell")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
