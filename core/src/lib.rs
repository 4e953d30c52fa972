//! redpanda-core
//!
//! Platform-independent core of the RedPanda software keyboard: which layer
//! is showing, what each key emits, and long-press repeat for delete.
//! Rendering and host wiring live in the platform shell; this crate only
//! decides state and events.
//!
//! Public API:
//! - `Layer` - lowercase / uppercase / numeric / symbols
//! - `LayerLayout` - static key rows for each layer
//! - `transition` / `LayerController` - the layer state machine
//! - `KeyEvent` - text or control token sent to the host
//! - `Scheduler` / `DeadlineScheduler` - cancellable repeating timers
//! - `Keyboard` - session + repeat timers + event sink, the host-facing type
//! - `Config` - repeat timing and initial layer, loadable from TOML
//!
//! ```rust
//! use redpanda_core::{Config, EventLog, KeyEvent, Keyboard, Layer};
//!
//! let mut keyboard = Keyboard::with_sink(&Config::default(), EventLog::new())?;
//! keyboard.tap("shift");
//! assert_eq!(keyboard.layer(), Layer::Uppercase);
//! keyboard.tap("H");
//! keyboard.tap("i");
//! assert_eq!(keyboard.layer(), Layer::Lowercase);
//! assert_eq!(
//!     keyboard.sink().events(),
//!     &[KeyEvent::insert("H"), KeyEvent::insert("i")]
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub use config::Config;

pub mod layer;
pub use layer::Layer;

pub mod layout;
pub use layout::LayerLayout;

pub mod key_event;
pub use key_event::{KeyAction, KeyEvent};

pub mod controller;
pub use controller::{transition, LayerController, Transition};

pub mod scheduler;
pub use scheduler::{DeadlineScheduler, Scheduler, TimerHandle};

pub mod repeat;
pub use repeat::KeyRepeater;

pub mod context;
pub use context::KeyboardContext;

pub mod session;
pub use session::{KeyboardSession, PressState};

pub mod proxy;
pub use proxy::{EventLog, KeySink, ProxySink, TextDocumentProxy};

pub mod document;
pub use document::TextDocument;

pub mod keyboard;
pub use keyboard::Keyboard;
