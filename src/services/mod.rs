//! Service layer: background calculation orchestration and result delivery.
//!
//! The HTTP layer hands accepted requests to the [`dispatcher`], which runs
//! each one through the [`calculation`] task: randomized delay, distance
//! estimation, then a single delivery attempt via the [`callback`] client.
//! The [`delivery_tracker`] records every request's lifecycle so outcomes
//! stay observable after the submitter has already received its `202`.

pub mod calculation;
pub mod callback;
pub mod delivery_tracker;
pub mod dispatcher;

pub use callback::CallbackClient;
pub use delivery_tracker::{DeliveryRecord, DeliveryStatus, DeliveryTracker};
pub use dispatcher::{CalculationJob, DispatchError, Dispatcher};
