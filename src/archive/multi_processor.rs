use crate::archive::RegionExtractor;
use crate::error::Result;
use crate::models::LocatedSummary;
use crate::utils::progress::ProgressReporter;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetComposition {
    pub total_records: usize,
    pub records_by_location: BTreeMap<String, usize>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub records_with_temperature: usize,
    pub records_with_precipitation: usize,
    pub records_with_wind_speed: usize,
}

impl DatasetComposition {
    pub fn from_records(records: &[LocatedSummary]) -> Self {
        let mut composition = Self {
            total_records: records.len(),
            ..Self::default()
        };

        for record in records {
            *composition
                .records_by_location
                .entry(record.location.clone())
                .or_default() += 1;

            let date = record.date();
            composition.date_range = Some(match composition.date_range {
                Some((start, end)) => (start.min(date), end.max(date)),
                None => (date, date),
            });

            let summary = &record.summary;
            if summary.has_temperature_data() {
                composition.records_with_temperature += 1;
            }
            if summary.mean_precip.is_some() {
                composition.records_with_precipitation += 1;
            }
            if summary.mean_wind_speed.is_some() {
                composition.records_with_wind_speed += 1;
            }
        }

        composition
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("Dataset Composition:\n  Total Records: {}\n", self.total_records);

        if let Some((start, end)) = &self.date_range {
            summary.push_str(&format!("  Date Range: {} to {}\n", start, end));
        }

        summary.push_str(&format!(
            "  With Temperature: {}\n  With Precipitation: {}\n  With Wind Speed: {}\n",
            self.records_with_temperature,
            self.records_with_precipitation,
            self.records_with_wind_speed
        ));

        summary.push_str("  Locations:\n");
        for (location, count) in &self.records_by_location {
            summary.push_str(&format!("    {}: {} days\n", location, count));
        }

        summary
    }
}

/// Runs the region extractor for several regions and stacks the results.
pub struct RegionCombiner {
    extractor: RegionExtractor,
}

impl RegionCombiner {
    pub fn new(extractor: RegionExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &RegionExtractor {
        &self.extractor
    }

    /// Every region's summaries over the same archives, tagged with the
    /// region name, in `regions` order. A station listed under two regions
    /// counts towards both.
    pub fn combine(&self, regions: &[String], files: &[String]) -> Result<Vec<LocatedSummary>> {
        self.combine_with_progress(regions, files, None)
    }

    pub fn combine_with_progress(
        &self,
        regions: &[String],
        files: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<LocatedSummary>> {
        let mut combined = Vec::new();

        for region in regions {
            if let Some(p) = progress {
                p.set_message(&format!("Extracting {}...", region));
            }

            let summaries = self.extractor.extract(files, region)?;
            info!(region = %region, days = summaries.len(), "Region extracted");

            combined.extend(
                summaries
                    .into_iter()
                    .map(|summary| LocatedSummary::new(region.as_str(), summary)),
            );

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(combined)
    }
}
