//! `cs-engine` — discrete-event substrate for the crossing_sim model.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`event_queue`] | `EventKey`, `Event`, `EventQueue`                         |
//! | [`clock`]       | `VirtualClock` — `schedule_at`, `advance`, `now`          |
//! | [`process`]     | `Process` trait, `Step`, `ProcessContext`, `ProcessState` |
//! | [`scheduler`]   | `Scheduler<W>` — spawn, step, run                         |
//! | [`observer`]    | `SimObserver` trait, `NoopObserver`, `EventRecorder`      |
//! | [`stream`]      | `EventStream` — lazy iterator over lifecycle events       |
//! | [`error`]       | `EngineError`, `EngineResult<T>`                          |
//!
//! # Drive loop
//!
//! ```text
//! loop:
//!   ① advance  — pop the earliest (time, sequence) event whose time is
//!                within the horizon; move the clock to it.  Wake-ups due at
//!                the same instant come out in registration order.
//!   ② resume   — call Process::resume on the owning process with a context
//!                holding the clock reading and the shared world.
//!   ③ apply    — Step::Wait(d)  → schedule a wake-up at now + d
//!                Step::Until(t) → schedule a wake-up at t
//!                Step::Done     → drop the process
//!   ④ publish  — hand emitted lifecycle events to the observer / stream.
//! ```
//!
//! Everything runs on one thread.  A process only gives up control by
//! returning from `resume`, so the world it borrows is never touched by two
//! processes at once.

pub mod clock;
pub mod error;
pub mod event_queue;
pub mod observer;
pub mod process;
pub mod scheduler;
pub mod stream;


pub use clock::{EventHandle, VirtualClock};
pub use error::{EngineError, EngineResult};
pub use event_queue::{Event, EventKey, EventQueue};
pub use observer::{EventRecorder, NoopObserver, SimObserver};
pub use process::{Process, ProcessContext, ProcessState, Step};
pub use scheduler::{ProcessHandle, RunStats, Scheduler};
pub use stream::EventStream;
