//! Shared building blocks used by both conversion directions and by the
//! table editor.

pub mod inline;
pub mod macros;
pub mod markup;
pub mod media;
