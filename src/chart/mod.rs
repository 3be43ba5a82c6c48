//! Chart presentation seam.
//!
//! Rendering is delegated to an external component; this module only defines
//! the configuration it receives and the surface the lookup controller drives.

pub mod options;
pub mod theme;

pub use options::{range_presets, AxisType, ChartOptions, RangeButton, RangeUnit};
pub use theme::Theme;

use crate::shared::LookupKey;

/// The presentation area a [`LookupController`](crate::lookup::LookupController) drives.
///
/// Implemented by the host (DOM bridge, TUI, test recorder).
pub trait ChartPresenter {
    /// Clear the presentation area and show a loading placeholder.
    fn show_loading(&mut self, key: &LookupKey);

    /// Data arrived; the (possibly expensive) draw comes next.
    fn show_rendering(&mut self, key: &LookupKey);

    /// Replace the presentation area with a failure message.
    fn show_error(&mut self, message: &str);

    /// Construct a new chart instance from `options`.
    fn draw(&mut self, options: ChartOptions);
}
