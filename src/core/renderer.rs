use crate::core::masonry::MasonryLayout;
use crate::domain::model::{
    CardView, Frame, MasonryOptions, PlacedCard, Record, RenderStats, RenderStrategy, Sequence,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://pokeres.bastionbot.org/images/pokemon";
pub const CARD_IMAGE_TITLE: &str = "ivysaur";

pub fn build_card(record: &Record, image_base_url: &str) -> CardView {
    CardView {
        id: record.id,
        image_url: format!("{}/{}.png", image_base_url.trim_end_matches('/'), record.id),
        image_title: CARD_IMAGE_TITLE.to_string(),
        title: record.name.clone(),
        subtitle: format!("experience {} height {}", record.experience, record.height),
    }
}

struct MemoEntry {
    record: Arc<Record>,
    card: Arc<CardView>,
}

/// 把序列轉成一個 frame；策略在建構時決定，執行期間不切換
pub struct CardRenderer {
    strategy: RenderStrategy,
    image_base_url: String,
    masonry: MasonryOptions,
    memo: HashMap<u32, MemoEntry>,
}

impl CardRenderer {
    pub fn new(strategy: RenderStrategy, image_base_url: &str, masonry: MasonryOptions) -> Self {
        Self {
            strategy,
            image_base_url: image_base_url.to_string(),
            masonry,
            memo: HashMap::new(),
        }
    }

    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.masonry.scroll_offset = offset.max(0.0);
    }

    pub fn render(&mut self, sequence: &Sequence) -> Frame {
        let (cards, stats) = match self.strategy {
            RenderStrategy::Plain => self.render_plain(sequence),
            RenderStrategy::Memoized => self.render_memoized(sequence),
            RenderStrategy::Windowed => self.render_windowed(sequence),
        };

        tracing::debug!(
            "Rendered {} frame: {} created, {} reused, {} skipped",
            self.strategy,
            stats.created,
            stats.reused,
            stats.skipped
        );

        Frame {
            strategy: self.strategy,
            total: sequence.len(),
            cards,
            stats,
        }
    }

    fn render_plain(&self, sequence: &Sequence) -> (Vec<PlacedCard>, RenderStats) {
        let cards: Vec<PlacedCard> = sequence
            .iter()
            .enumerate()
            .map(|(index, record)| PlacedCard {
                index,
                card: Arc::new(build_card(record, &self.image_base_url)),
                placement: None,
            })
            .collect();

        let stats = RenderStats {
            created: cards.len(),
            ..RenderStats::default()
        };
        (cards, stats)
    }

    fn render_memoized(&mut self, sequence: &Sequence) -> (Vec<PlacedCard>, RenderStats) {
        let mut stats = RenderStats::default();
        let mut cards = Vec::with_capacity(sequence.len());

        for (index, record) in sequence.iter().enumerate() {
            let cached = self
                .memo
                .get(&record.id)
                .filter(|entry| Arc::ptr_eq(&entry.record, record) || entry.record == *record)
                .map(|entry| Arc::clone(&entry.card));

            let card = match cached {
                Some(card) => {
                    stats.reused += 1;
                    card
                }
                None => {
                    stats.created += 1;
                    let card = Arc::new(build_card(record, &self.image_base_url));
                    self.memo.insert(
                        record.id,
                        MemoEntry {
                            record: Arc::clone(record),
                            card: Arc::clone(&card),
                        },
                    );
                    card
                }
            };

            cards.push(PlacedCard {
                index,
                card,
                placement: None,
            });
        }

        // 已不在序列中的卡片視為 unmount
        let present: HashSet<u32> = sequence.iter().map(|r| r.id).collect();
        self.memo.retain(|id, _| present.contains(id));

        (cards, stats)
    }

    fn render_windowed(&self, sequence: &Sequence) -> (Vec<PlacedCard>, RenderStats) {
        let layout = MasonryLayout::compute(sequence.len(), &self.masonry);
        let visible = layout.visible_indices(
            self.masonry.scroll_offset,
            self.masonry.viewport_height,
            self.masonry.overscan_by,
        );

        let cards: Vec<PlacedCard> = visible
            .into_iter()
            .filter_map(|index| {
                let record = sequence.get(index)?;
                Some(PlacedCard {
                    index,
                    card: Arc::new(build_card(record, &self.image_base_url)),
                    placement: layout.placement(index),
                })
            })
            .collect();

        let stats = RenderStats {
            created: cards.len(),
            reused: 0,
            skipped: sequence.len() - cards.len(),
        };
        (cards, stats)
    }
}
