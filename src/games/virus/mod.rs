//! Virus!
//!
//! Players build a body of four healthy organs while infecting opponents.
//! Hands are hidden and drawn from a shared pile; bodies and the discard
//! pile are public.
//!
//! Supports 2-6 players.

mod game;

pub use game::{Virus, VirusBuilder, VirusCard, VirusColor, VirusKind};
