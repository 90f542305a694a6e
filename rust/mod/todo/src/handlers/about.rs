//! GET /about

use super::Outcome;
use crate::views::{Template, View};

pub fn about() -> Outcome {
    Outcome::Page(View::new(Template::Credits))
}
