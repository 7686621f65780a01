//! # Events Module
//!
//! Event-driven progress reporting for the watermark pipeline.
//!
//! ## Design
//! The core library emits events through channels, allowing any front end
//! to subscribe and print per-file status without the core writing to stdout.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::File(FileEvent::Saved { output, .. }) => println!("Saved: {}", output.display()),
//!             Event::File(FileEvent::Skipped { path, reason }) => println!("Skipping {}: {}", path.display(), reason),
//!             _ => {}
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
