#![allow(dead_code)]

use chart_block::render::{ChartSpec, ChartSurface};
use chart_block::{ChartConfig, ChartType, Dataset, Result};

/// Surface that remembers every draw request and tracks live handles.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub drawn: Vec<ChartSpec>,
    pub live: Vec<u32>,
    pub destroyed: Vec<u32>,
    next: u32,
}

impl RecordingSurface {
    pub fn last(&self) -> &ChartSpec {
        self.drawn.last().expect("nothing drawn yet")
    }
}

impl ChartSurface for RecordingSurface {
    type Handle = u32;

    fn draw(&mut self, spec: &ChartSpec) -> Result<u32> {
        self.next += 1;
        self.drawn.push(spec.clone());
        self.live.push(self.next);
        Ok(self.next)
    }

    fn destroy(&mut self, handle: u32) {
        self.live.retain(|h| *h != handle);
        self.destroyed.push(handle);
    }
}

pub fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn chart(chart_type: ChartType, label_items: &[&str], datasets: Vec<Dataset>) -> ChartConfig {
    ChartConfig {
        chart_type,
        labels: labels(label_items),
        datasets,
        title: String::new(),
    }
}
