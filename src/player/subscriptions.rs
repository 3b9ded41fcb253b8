use crate::audio::MediaEvent;

/// One-shot reactions to media notifications.
///
/// A subscription fires on the first matching notification and is removed
/// with it. Subscribing an action that is already pending for the same
/// notification keeps a single copy.
#[derive(Debug)]
pub struct OnceSubscriptions<A> {
    pending: Vec<(MediaEvent, A)>,
}

impl<A> Default for OnceSubscriptions<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A: PartialEq> OnceSubscriptions<A> {
    pub fn subscribe(&mut self, event: MediaEvent, action: A) {
        let duplicate = self
            .pending
            .iter()
            .any(|(e, a)| *e == event && *a == action);
        if !duplicate {
            self.pending.push((event, action));
        }
    }

    /// Remove and return every action waiting on `event`, in subscription order.
    pub fn take(&mut self, event: MediaEvent) -> Vec<A> {
        let mut fired = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());
        for (e, a) in self.pending.drain(..) {
            if e == event {
                fired.push(a);
            } else {
                kept.push((e, a));
            }
        }
        self.pending = kept;
        fired
    }

    #[cfg(test)]
    pub fn pending(&self, event: MediaEvent) -> usize {
        self.pending.iter().filter(|(e, _)| *e == event).count()
    }
}
