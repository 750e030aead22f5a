//! UI module - painting helpers shared by the grid and the lightbox

pub mod components;
