pub mod spinner;

pub use spinner::{InlineSpinner, LoadingSpinner, Spinner};
