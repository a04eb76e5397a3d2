//! Static pages of the forecast gallery.
//!
//! Two pages are produced: the landing page at the site root, a month
//! calendar linking each day to its forecast run, and one viewer page per
//! run that loads the run's catalog script and animates its frames.
//!
//! Pages are rendered from embedded templates with typed inputs
//! ([`LandingPage`], [`ViewerPage`]) and written with
//! [`write_public`], which replaces the target atomically.

pub mod calendar;
pub mod pages;
pub mod template;
pub mod writer;

pub use calendar::{CalendarCell, CalendarMonth, DayState, MONTH_NAMES, WEEKDAY_HEADERS};
pub use pages::{LandingPage, SiteSettings, ViewerPage};
pub use template::{html_escape, Template};
pub use writer::write_public;
