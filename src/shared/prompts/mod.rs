//! Prompt template management.
//!
//! Templates live in `templates/prompts/`, use Jinja2 syntax and are
//! compiled into the binary.

pub mod engine;

pub use engine::{render_template, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

use crate::shared::genre::Genre;

/// Render the genre detection prompt for the given mood.
pub fn render_genre_detection_prompt(mood: &str) -> Result<String, TemplateError> {
    let genres: Vec<&str> = Genre::ALL.iter().map(|g| g.as_str()).collect();

    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("mood", Value::from(mood));
    ctx.insert("genres", Value::from_serialize(&genres));

    render_template("genre_detection.jinja", &ctx)
}
