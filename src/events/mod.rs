mod channel;
mod progression_event;

pub use channel::{Channel, EventEmitter, EventObserver, SubscriptionId};
pub use progression_event::ProgressionEvent;
