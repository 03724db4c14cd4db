//! Terminal rendering.
//!
//! The whole pane is redrawn from scratch on every render: the state is
//! reduced to a [`UIViewModel`], each component writes its rows into one frame
//! string, and the frame is printed. Nothing is diffed.
//!
//! - [`viewmodel`]: what a frame shows
//! - [`renderer`]: frame assembly and output
//! - [`components`]: header, form, event table, status, footer
//! - [`helpers`]: cursor movement and width-aware text fitting
//! - [`theme`]: palettes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    ColumnLayout, DisplayItem, EmptyState, FooterInfo, FormFieldInfo, FormInfo, HeaderInfo, StatusInfo, UIViewModel,
};
