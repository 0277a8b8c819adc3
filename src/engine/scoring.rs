use rand::Rng;

use crate::reference::CropLabel;

pub const PREDEFINED_BASE: f64 = 1.0;
pub const PREDICTED_BASE: f64 = 0.5;
/// Upper bound (exclusive) of the per-request random addend.
pub const JITTER_MAX: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCrop {
    pub crop: CropLabel,
    pub score: f64,
    pub predefined: bool,
}

/// Predefined crops first in table order, then novel predictions in
/// first-seen order. No crop appears twice.
pub fn merge_candidates(predefined: &[CropLabel], predicted: &[CropLabel]) -> Vec<CropLabel> {
    let mut candidates: Vec<CropLabel> = Vec::with_capacity(predefined.len() + predicted.len());
    for crop in predefined.iter().chain(predicted) {
        if !candidates.contains(crop) {
            candidates.push(*crop);
        }
    }
    candidates
}

/// Scores candidates and returns them best first. Equal scores keep
/// candidate order.
pub fn score_candidates<R: Rng + ?Sized>(
    candidates: &[CropLabel],
    predefined: &[CropLabel],
    rng: &mut R,
) -> Vec<ScoredCrop> {
    let mut scored = candidates
        .iter()
        .map(|crop| {
            let predefined = predefined.contains(crop);
            let base = if predefined {
                PREDEFINED_BASE
            } else {
                PREDICTED_BASE
            };
            ScoredCrop {
                crop: *crop,
                score: base + rng.gen_range(0.0..JITTER_MAX),
                predefined,
            }
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Maps a raw score onto the integer 0-150 scale, rounding half away from zero.
pub fn to_scale(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}
