use anyhow::Result;

use crate::engine::RecommendationResult;
use crate::reference::ReferenceData;

pub fn recommendation_to_csv(result: &RecommendationResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "soil",
        "rank",
        "crop",
        "score",
        "organic_fertilizer",
        "homemade_fertilizer",
    ])?;
    for (idx, crop) in result.recommended_crops.iter().enumerate() {
        writer.write_record([
            result.soil.to_string(),
            (idx + 1).to_string(),
            crop.name.to_string(),
            crop.score.to_string(),
            crop.fertilizer.organic.to_string(),
            crop.fertilizer.homemade.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// Suitable crops are joined with `;` into a single column.
pub fn soils_to_csv(reference: &ReferenceData) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "soil",
        "description",
        "organic_fertilizer",
        "homemade_fertilizer",
        "suitable_crops",
    ])?;
    for soil in reference.soils() {
        let advice = reference.soil_advice(soil);
        let crops = reference
            .suitable_crops(soil)
            .iter()
            .map(|crop| crop.as_str())
            .collect::<Vec<_>>()
            .join(";");
        writer.write_record([
            soil.as_str(),
            soil.description(),
            advice.organic,
            advice.homemade,
            crops.as_str(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
