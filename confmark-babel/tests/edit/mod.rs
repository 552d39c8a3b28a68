//! Free-form patches and the page editor

mod page_editor;
mod patch;
