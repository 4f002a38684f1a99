//! HTML rendering of a [`FormOutput`]

use super::FormOutput;
use crate::error::Result;
use minijinja::{context, Environment};
use serde::Serialize;

const PAGE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("page.html");

/// Slider fields pre-formatted the way the range input expects them
#[derive(Serialize)]
struct SliderView<'a> {
    key: &'a str,
    label: &'a str,
    prompt: &'a str,
    min: String,
    max: String,
    step: String,
    value: String,
}

/// Full page for one render pass. Changing a slider resubmits the form.
///
/// The template name ends in `.html`, so every interpolated value is HTML-escaped.
/// `**bold**` spans in the description become `<strong>`.
pub fn render_page(output: &FormOutput) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(PAGE_NAME, PAGE_TEMPLATE)?;

    let sliders: Vec<SliderView> = output
        .sliders
        .iter()
        .map(|s| SliderView {
            key: s.key,
            label: s.label,
            prompt: &s.prompt,
            min: format!("{:.1}", s.min),
            max: format!("{:.1}", s.max),
            step: s.step.to_string(),
            value: format!("{:.2}", s.value),
        })
        .collect();
    let description_parts: Vec<&str> = output.description.split("**").collect();

    let html = env.get_template(PAGE_NAME)?.render(context!(
        title => output.title,
        description_parts => description_parts,
        sliders => sliders,
        header => output.header,
        lead => output.lead,
        prediction => &output.prediction,
    ))?;
    Ok(html)
}
