// src/gui/router.rs
use super::pages::{self, Page};

pub static PAGES: &[&'static dyn Page] = &[
    &pages::plot::DATA,
    &pages::plot::DAILY_GROWTH,
    &pages::plot::GROWTH_RATE,
    &pages::fit_params::PAGE,
];

pub fn all_pages() -> &'static [&'static dyn Page] {
    PAGES
}
