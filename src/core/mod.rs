pub mod panel;
pub mod widget;
