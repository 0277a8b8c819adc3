use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::engine::scoring::{to_scale, PREDEFINED_BASE};
use crate::engine::RecommendationResult;
use crate::reference::{CropLabel, FertilizerAdvice, ReferenceData};

pub fn render_recommendation_table(result: &RecommendationResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Rank",
        "Crop",
        "Score",
        "Organic Fertilizer",
        "Homemade Fertilizer",
    ]);

    let top_tier = to_scale(PREDEFINED_BASE);
    for (idx, crop) in result.recommended_crops.iter().enumerate() {
        let score_cell = if crop.score >= top_tier {
            Cell::new(crop.score).fg(Color::Green)
        } else {
            Cell::new(crop.score).fg(Color::Yellow)
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(crop.name),
            score_cell,
            Cell::new(crop.fertilizer.organic),
            Cell::new(crop.fertilizer.homemade),
        ]));
    }

    format!(
        "{} soil: {}\nSoil fertilizer: {} / {}\n{}",
        result.soil,
        result.soil_description,
        result.soil_fertilizer.organic,
        result.soil_fertilizer.homemade,
        table
    )
}

pub fn render_soils_table(reference: &ReferenceData) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Soil", "Description", "Suitable Crops", "Organic", "Homemade"]);
    for soil in reference.soils() {
        let advice = reference.soil_advice(soil);
        let crops = reference
            .suitable_crops(soil)
            .iter()
            .map(CropLabel::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            soil.to_string(),
            soil.description().to_string(),
            crops,
            advice.organic.to_string(),
            advice.homemade.to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_fertilizer_table(crop: CropLabel, advice: &FertilizerAdvice) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Crop", "Organic", "Homemade"]);
    let crop_cell = if *advice == FertilizerAdvice::CROP_DEFAULT {
        Cell::new(format!("{crop} (default)")).fg(Color::Yellow)
    } else {
        Cell::new(crop)
    };
    table.add_row(Row::from(vec![
        crop_cell,
        Cell::new(advice.organic),
        Cell::new(advice.homemade),
    ]));
    table.to_string()
}
