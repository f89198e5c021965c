//! SVG misery chart renderer.
//!
//! Bar charts of each agent's cost: one bar per agent for a single
//! assignment, or a before/after pair per agent labelled with the items.

use std::fmt::Write as _;

use crate::domain::assignment::Assignment;
use crate::domain::preferences::PreferenceModel;
use crate::ports::{ChartRenderer, RenderError};

use super::html_notification::escape;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 48.0;
const BEFORE_COLOR: &str = "lightcoral";
const AFTER_COLOR: &str = "deepskyblue";
const SINGLE_COLOR: &str = "steelblue";

/// Renders misery charts as standalone SVG documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self
    }
}

struct Bar<'a> {
    value: f64,
    color: &'static str,
    label: Option<&'a str>,
}

struct Plot {
    svg: String,
    y_max: f64,
    slot: f64,
}

impl Plot {
    fn new(groups: usize, y_max: f64) -> Result<Self, RenderError> {
        let mut svg = String::new();
        write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
             viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\" font-size=\"12\">"
        )?;
        write!(
            svg,
            "<line x1=\"{MARGIN}\" y1=\"{bottom}\" x2=\"{right}\" y2=\"{bottom}\" stroke=\"black\"/>\
             <line x1=\"{MARGIN}\" y1=\"{MARGIN}\" x2=\"{MARGIN}\" y2=\"{bottom}\" stroke=\"black\"/>\
             <text x=\"14\" y=\"{mid}\" transform=\"rotate(-90 14 {mid})\" text-anchor=\"middle\">Misery</text>",
            bottom = HEIGHT - MARGIN,
            right = WIDTH - MARGIN,
            mid = HEIGHT / 2.0,
        )?;
        let ticks = y_max.ceil().max(1.0) as usize;
        for tick in 0..=ticks {
            let y = Self::y_at(tick as f64, y_max);
            write!(
                svg,
                "<text x=\"{x}\" y=\"{y:.1}\" text-anchor=\"end\">{tick}</text>",
                x = MARGIN - 6.0,
            )?;
        }

        Ok(Self {
            svg,
            y_max,
            slot: (WIDTH - 2.0 * MARGIN) / groups.max(1) as f64,
        })
    }

    fn y_at(value: f64, y_max: f64) -> f64 {
        let plot_height = HEIGHT - 2.0 * MARGIN;
        let ratio = if y_max > 0.0 { value / y_max } else { 0.0 };
        HEIGHT - MARGIN - plot_height * ratio.clamp(0.0, 1.0)
    }

    fn group(&mut self, index: usize, name: &str, bars: &[Bar<'_>]) -> Result<(), RenderError> {
        let left = MARGIN + self.slot * index as f64;
        let bar_width = self.slot * 0.8 / bars.len().max(1) as f64;
        let bottom = HEIGHT - MARGIN;

        for (i, bar) in bars.iter().enumerate() {
            let x = left + self.slot * 0.1 + bar_width * i as f64;
            let top = Self::y_at(bar.value, self.y_max);
            write!(
                self.svg,
                "<rect x=\"{x:.1}\" y=\"{top:.1}\" width=\"{bar_width:.1}\" height=\"{h:.1}\" fill=\"{c}\"/>",
                h = bottom - top,
                c = bar.color,
            )?;
            if let Some(label) = bar.label {
                let cx = x + bar_width / 2.0;
                let cy = bottom - 4.0;
                write!(
                    self.svg,
                    "<text x=\"{cx:.1}\" y=\"{cy:.1}\" transform=\"rotate(-90 {cx:.1} {cy:.1})\">{}</text>",
                    escape(label)
                )?;
            }
        }

        write!(
            self.svg,
            "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"middle\">{}</text>",
            escape(name),
            x = left + self.slot / 2.0,
            y = bottom + 16.0,
        )?;
        Ok(())
    }

    fn legend(&mut self) -> Result<(), RenderError> {
        for (i, (color, text)) in [(BEFORE_COLOR, "Before swap"), (AFTER_COLOR, "After swap")]
            .into_iter()
            .enumerate()
        {
            let y = MARGIN / 2.0 + 14.0 * i as f64;
            write!(
                self.svg,
                "<rect x=\"{x}\" y=\"{ry}\" width=\"10\" height=\"10\" fill=\"{color}\"/>\
                 <text x=\"{tx}\" y=\"{ty}\">{text}</text>",
                x = WIDTH - 140.0,
                ry = y - 9.0,
                tx = WIDTH - 124.0,
                ty = y,
            )?;
        }
        Ok(())
    }

    fn finish(mut self) -> String {
        self.svg.push_str("</svg>");
        self.svg
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render_single(
        &self,
        model: &PreferenceModel,
        assignment: &Assignment,
    ) -> Result<String, RenderError> {
        let mut plot = Plot::new(assignment.len(), assignment.len() as f64)?;
        for (i, (agent, item)) in assignment.pairs().enumerate() {
            let bar = Bar {
                value: model.cost(agent, item)?,
                color: SINGLE_COLOR,
                label: None,
            };
            plot.group(i, agent.as_str(), &[bar])?;
        }
        Ok(plot.finish())
    }

    fn render_comparison(
        &self,
        model: &PreferenceModel,
        before: &Assignment,
        after: &Assignment,
    ) -> Result<String, RenderError> {
        if before.agents() != after.agents() {
            return Err(RenderError::AgentsDiffer);
        }

        let mut y_max: f64 = 0.0;
        for agent in after.agents() {
            for (_, cost) in model.costs_for(agent)? {
                y_max = y_max.max(cost);
            }
        }

        let mut plot = Plot::new(after.len(), y_max)?;
        for (i, ((agent, old), (_, new))) in before.pairs().zip(after.pairs()).enumerate() {
            let bars = [
                Bar {
                    value: model.cost(agent, old)?,
                    color: BEFORE_COLOR,
                    label: Some(old.as_str()),
                },
                Bar {
                    value: model.cost(agent, new)?,
                    color: AFTER_COLOR,
                    label: Some(new.as_str()),
                },
            ];
            plot.group(i, agent.as_str(), &bars)?;
        }
        plot.legend()?;
        Ok(plot.finish())
    }
}
