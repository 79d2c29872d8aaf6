/// UI module exports
pub mod options;
pub mod popup;
