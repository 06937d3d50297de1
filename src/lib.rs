//! Top-down croc arena: a player croc and wild crocs roam a walled world,
//! eat pickups to grow, and swallow each other on body contact.
//!
//! [`Simulation`] owns one session. Rendering, input and persistence live
//! outside this crate; they drive [`Simulation::step`] and read views back.

pub mod body;
pub mod camera;
pub mod config;
pub mod croc;
pub mod debug;
pub mod ecs;
pub mod pickup;
pub mod sim;

pub use camera::{Camera, Viewport};
pub use config::{ArenaConfig, ViewportClass};
pub use croc::cosmetics::Cosmetics;
pub use pickup::PickupKind;
pub use sim::{ActorView, FrameClock, Simulation, StepOutcome};
