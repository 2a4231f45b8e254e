//! Word Cloud Layout Module
//! Places weighted words on a canvas along an Archimedean spiral.
//!
//! The layout is independent of any drawing backend: the GUI paints it with
//! egui and the exporter rasterises it with plotters.

use crate::stats::text::{word_frequencies, STOPWORDS};

/// Viridis anchor colours, dark to light.
const VIRIDIS: [[u8; 3]; 6] = [
    [68, 1, 84],
    [65, 68, 135],
    [42, 120, 142],
    [34, 168, 132],
    [122, 209, 81],
    [253, 231, 37],
];

/// Approximate advance of one glyph relative to the font size.
const GLYPH_WIDTH: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.15;

/// Word cloud canvas and sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordCloudOptions {
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Padding kept around every word box.
    pub margin: f32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            max_words: 200,
            min_font_size: 10.0,
            max_font_size: 80.0,
            margin: 2.0,
        }
    }
}

/// A word with its final position. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [u8; 3],
}

impl PlacedWord {
    fn overlaps(&self, x: f32, y: f32, w: f32, h: f32, margin: f32) -> bool {
        x < self.x + self.width + margin
            && self.x < x + w + margin
            && y < self.y + self.height + margin
            && self.y < y + h + margin
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCloudLayout {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lay out the Q5 corpus with default options. `None` when no word survives
/// tokenization, in which case no cloud is drawn or exported.
pub fn cloud_for_corpus(corpus: &str) -> Option<WordCloudLayout> {
    if corpus.trim().is_empty() {
        return None;
    }
    let cloud = layout(&word_frequencies(corpus, STOPWORDS), &WordCloudOptions::default());
    (!cloud.is_empty()).then_some(cloud)
}

/// Colour at `t` in `[0, 1]` along the viridis ramp.
pub fn viridis(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f32;
    let i = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let f = t - i as f32;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let mix = |k: usize| (a[k] as f32 + (b[k] as f32 - a[k] as f32) * f).round() as u8;
    [mix(0), mix(1), mix(2)]
}

/// Lay out `words` (most frequent first). Words that do not fit are dropped.
pub fn layout(words: &[(String, usize)], opts: &WordCloudOptions) -> WordCloudLayout {
    let mut result = WordCloudLayout {
        width: opts.width,
        height: opts.height,
        words: Vec::new(),
    };

    let words = &words[..words.len().min(opts.max_words)];
    let Some(max_count) = words.iter().map(|(_, n)| *n).max() else {
        return result;
    };
    let min_count = words.iter().map(|(_, n)| *n).min().unwrap_or(max_count);
    let total = words.len();

    for (rank, (text, count)) in words.iter().enumerate() {
        let weight = if max_count == min_count {
            0.6
        } else {
            (*count - min_count) as f32 / (max_count - min_count) as f32
        };
        let mut font_size =
            opts.min_font_size + (opts.max_font_size - opts.min_font_size) * weight;

        // Shrink words that would not fit the canvas at all.
        let chars = text.chars().count().max(1) as f32;
        let fit = (opts.width - 2.0 * opts.margin) / (chars * GLYPH_WIDTH);
        font_size = font_size.min(fit);
        if font_size < opts.min_font_size.min(4.0) {
            continue;
        }

        let w = chars * font_size * GLYPH_WIDTH;
        let h = font_size * LINE_HEIGHT;

        if let Some((x, y)) = find_slot(&result.words, w, h, opts) {
            let t = if total > 1 {
                rank as f32 / (total - 1) as f32
            } else {
                0.0
            };
            result.words.push(PlacedWord {
                text: text.clone(),
                count: *count,
                font_size,
                x,
                y,
                width: w,
                height: h,
                color: viridis(t),
            });
        }
    }

    result
}

/// Walk a spiral out from the centre until a free box is found.
fn find_slot(placed: &[PlacedWord], w: f32, h: f32, opts: &WordCloudOptions) -> Option<(f32, f32)> {
    const SPACING: f32 = 4.0;
    const STEP: f32 = 5.0;

    let (cx, cy) = (opts.width / 2.0, opts.height / 2.0);
    let aspect = opts.width / opts.height;
    let max_radius = (cx * cx + cy * cy).sqrt() * aspect.max(1.0);

    let mut theta: f32 = 0.0;
    loop {
        let r = SPACING * theta;
        if r > max_radius {
            return None;
        }

        // Stretch along the longer axis so the cloud fills the canvas.
        let x = cx + r * theta.cos() - w / 2.0;
        let y = cy + r * theta.sin() / aspect - h / 2.0;

        let inside = x >= opts.margin
            && y >= opts.margin
            && x + w <= opts.width - opts.margin
            && y + h <= opts.height - opts.margin;

        if inside && !placed.iter().any(|p| p.overlaps(x, y, w, h, opts.margin)) {
            return Some((x, y));
        }

        theta += STEP / r.max(SPACING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(w, n)| (w.to_string(), *n)).collect()
    }

    #[test]
    fn empty_input_gives_empty_layout() {
        let l = layout(&[], &WordCloudOptions::default());
        assert!(l.is_empty());
        assert_eq!(l.width, 800.0);
    }

    #[test]
    fn placed_words_stay_inside_and_do_not_overlap() {
        let input = words(&[
            ("trees", 9),
            ("shade", 7),
            ("water", 5),
            ("fountains", 4),
            ("green", 4),
            ("roofs", 3),
            ("parks", 2),
            ("awareness", 1),
            ("insulation", 1),
            ("buses", 1),
        ]);
        let opts = WordCloudOptions::default();
        let l = layout(&input, &opts);

        assert_eq!(l.words.len(), input.len());
        for (i, a) in l.words.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.width <= opts.width && a.y + a.height <= opts.height);
            for b in &l.words[i + 1..] {
                assert!(!a.overlaps(b.x, b.y, b.width, b.height, 0.0), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn frequent_words_are_larger() {
        let l = layout(&words(&[("trees", 10), ("shade", 1)]), &WordCloudOptions::default());
        assert_eq!(l.words[0].text, "trees");
        assert!(l.words[0].font_size > l.words[1].font_size);
    }

    #[test]
    fn respects_max_words() {
        let input: Vec<(String, usize)> = (0..50).map(|i| (format!("word{}", i), 1)).collect();
        let opts = WordCloudOptions {
            max_words: 5,
            ..Default::default()
        };
        assert!(layout(&input, &opts).words.len() <= 5);
    }

    #[test]
    fn layout_is_deterministic() {
        let input = words(&[("trees", 3), ("shade", 2), ("water", 1)]);
        let opts = WordCloudOptions::default();
        assert_eq!(layout(&input, &opts), layout(&input, &opts));
    }

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), [68, 1, 84]);
        assert_eq!(viridis(1.0), [253, 231, 37]);
    }

    #[test]
    fn no_cloud_when_every_q5_answer_is_missing() {
        use crate::data::fixtures::row;
        use crate::data::SurveyTable;
        use crate::stats::text::build_corpus;

        let table = SurveyTable::new(vec![
            row(1, "Rabat", Some("yes"), Some("no"), None),
            row(2, "Fes", Some("no"), Some("yes"), Some("   ")),
        ]);
        let corpus = build_corpus(&table);
        assert!(corpus.is_empty());
        assert!(cloud_for_corpus(&corpus).is_none());
    }

    #[test]
    fn cloud_for_corpus_skips_stopword_only_text() {
        assert!(cloud_for_corpus("the and of").is_none());

        let cloud = cloud_for_corpus("Plant trees. More trees and shade").unwrap();
        assert_eq!(cloud.words[0].text, "trees");
        assert_eq!(cloud.width, WordCloudOptions::default().width);
    }
}
