//! Command implementations for the shiori CLI

mod annotate;
mod index;
mod nav;
mod search;
mod toc;

pub use annotate::execute as annotate;
pub use index::execute as build_index;
pub use nav::execute as show_nav;
pub use search::execute as search;
pub use toc::execute as show_toc;
