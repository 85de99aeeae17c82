use crate::domain::model::Frame;
use crate::domain::ports::Surface;
use crate::utils::error::{GridError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 不輸出任何東西的 surface，只記錄畫了幾次；可選擇模擬繪製延遲
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    frames: AtomicUsize,
    cards: AtomicUsize,
    paint_delay: Option<Duration>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paint_delay(delay: Duration) -> Self {
        Self {
            paint_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn frames_painted(&self) -> usize {
        self.frames.load(Ordering::Relaxed)
    }

    pub fn cards_painted(&self) -> usize {
        self.cards.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Surface for HeadlessSurface {
    async fn paint(&self, frame: &Frame) -> Result<()> {
        if let Some(delay) = self.paint_delay {
            tokio::time::sleep(delay).await;
        }
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.cards.fetch_add(frame.materialized(), Ordering::Relaxed);
        Ok(())
    }
}

/// Writes every frame as plain text, one card per line.
pub struct TextSurface<W: Write + Send> {
    out: Mutex<W>,
}

impl TextSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.out.into_inner().map_err(|_| GridError::RenderError {
            message: "text surface writer was poisoned".to_string(),
        })
    }

    fn write_frame(&self, frame: &Frame) -> Result<()> {
        let mut out = self.out.lock().map_err(|_| GridError::RenderError {
            message: "text surface writer was poisoned".to_string(),
        })?;

        writeln!(
            out,
            "[Reverse Pokemon] {} strategy: {}/{} cards",
            frame.strategy,
            frame.materialized(),
            frame.total
        )?;

        for placed in &frame.cards {
            let card = &placed.card;
            match placed.placement {
                Some(p) => writeln!(
                    out,
                    "  #{:<3} col {} @ {:>6.0}  {} | {} | {}",
                    placed.index, p.column, p.top, card.title, card.subtitle, card.image_url
                )?,
                None => writeln!(
                    out,
                    "  #{:<3} {} | {} | {}",
                    placed.index, card.title, card.subtitle, card.image_url
                )?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> Surface for TextSurface<W> {
    async fn paint(&self, frame: &Frame) -> Result<()> {
        self.write_frame(frame)
    }
}
