mod classify;
mod model;

pub use classify::{Classifier, Event, RECOGNIZED_EVENTS};
pub use model::{EventKind, RawEvent, RefType, RepoRef};
