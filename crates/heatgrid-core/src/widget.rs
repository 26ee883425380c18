//! Per-instance widget state
//!
//! A `Heatmap` owns everything one widget needs across render passes:
//! its options, its data source, a render generation counter, and an
//! optional render-complete listener. The pipeline functions themselves
//! stay pure; all mutable state lives here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::config::HeatmapOptions;
use crate::error::{Error, Result};
use crate::models::{Record, RenderGrid};
use crate::services::assembler;
use crate::services::color_scale::ColorScale;
use crate::services::source::{DataSource, FetchQuery, InlineSource};

/// Render-complete notification: the resolved dataset on success,
/// `None` when the pass failed
pub type RenderListener = Arc<dyn Fn(Option<&[Record]>) + Send + Sync>;

/// One heatmap instance
pub struct Heatmap {
    options: HeatmapOptions,
    source: Box<dyn DataSource>,
    generation: AtomicU64,
    listener: Option<RenderListener>,
}

impl Heatmap {
    /// Create an instance over a data source.
    ///
    /// Options are validated eagerly so a bad color table fails at
    /// construction rather than on the first render.
    pub fn new(options: HeatmapOptions, source: Box<dyn DataSource>) -> Result<Self> {
        ColorScale::new(options.colors.clone(), options.color_mode)?;
        if let Some(day) = options.first_day_of_week {
            if day > 6 {
                return Err(Error::config(format!(
                    "first_day_of_week must be in 0..=6, got {}",
                    day
                )));
            }
        }
        Ok(Self {
            options,
            source,
            generation: AtomicU64::new(0),
            listener: None,
        })
    }

    /// Convenience constructor for in-memory data
    pub fn with_records(options: HeatmapOptions, records: Vec<Record>) -> Result<Self> {
        Self::new(options, Box::new(InlineSource::new(records)))
    }

    /// Attach a render-complete listener
    pub fn with_listener(mut self, listener: RenderListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    /// Replace the data source with an in-memory record list (the
    /// `setData` update path); the caller re-renders afterwards.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.source = Box::new(InlineSource::new(records));
    }

    /// Replace the configuration; takes effect on the next render
    pub fn set_options(&mut self, options: HeatmapOptions) -> Result<()> {
        ColorScale::new(options.colors.clone(), options.color_mode)?;
        self.options = options;
        Ok(())
    }

    fn notify(&self, records: Option<&[Record]>) {
        if let Some(listener) = &self.listener {
            listener(records);
        }
    }

    /// Run one render pass: fetch, bucket, scale, assemble.
    ///
    /// At most one pass may apply per instance at a time: starting a
    /// pass bumps the generation, and a fetch that finishes after a
    /// newer pass started is discarded with `Error::Superseded` (the
    /// transport is not forcibly stopped, its result just never
    /// applies). Superseded passes emit no notification; the winning
    /// pass notifies for the instance.
    pub async fn render(&self) -> Result<RenderGrid> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "render pass {} starting ({} source)",
            generation,
            self.source.source_name()
        );

        let query = FetchQuery {
            start_date: self.options.start_date,
            end_date: self.options.end_date,
            params: self
                .options
                .query_params
                .as_ref()
                .map(|f| f())
                .unwrap_or_default(),
        };

        let fetched = self.source.fetch(&query).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("render pass {} superseded, discarding result", generation);
            return Err(Error::Superseded);
        }

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                warn!("render pass {} fetch failed: {}", generation, e);
                self.notify(None);
                return Err(e);
            }
        };

        match assembler::assemble(&records, &self.options) {
            Ok(grid) => {
                self.notify(Some(&records));
                Ok(grid)
            }
            Err(e) => {
                warn!("render pass {} failed: {}", generation, e);
                self.notify(None);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for Heatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heatmap")
            .field("options", &self.options)
            .field("source", &self.source.source_name())
            .field("generation", &self.generation)
            .finish()
    }
}
