use crate::client::HhClient;
use crate::enricher::DetailEnricher;
use crate::models::{EnrichFailure, EnrichedVacancy, RawVacancy, RefinedVacancy, Vacancy};
use crate::writer::save_to_csv;
use crate::{normalizer, refiner, Result};

/// Entry point of the harvest flow. Each stage consumes the previous one,
/// so a run always moves collect → normalize → refine → enrich → save.
pub struct HarvestPipeline;

impl HarvestPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(self, client: HhClient) -> Result<PipelineWithItems> {
        let items = client.start_crawl()?;
        Ok(PipelineWithItems { items })
    }
}

impl Default for HarvestPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "collected items must be normalized to continue the pipeline"]
pub struct PipelineWithItems {
    items: Vec<RawVacancy>,
}

impl PipelineWithItems {
    pub fn normalize(self) -> PipelineWithVacancies {
        let vacancies = normalizer::normalize(self.items);
        println!("normalized {} records", vacancies.len());
        PipelineWithVacancies { vacancies }
    }
}

#[must_use = "normalized records must be refined to continue the pipeline"]
pub struct PipelineWithVacancies {
    vacancies: Vec<Vacancy>,
}

impl PipelineWithVacancies {
    pub fn refine(self, accepted_currency: &str) -> PipelineWithRefined {
        let vacancies = refiner::refine(self.vacancies, accepted_currency);
        println!("{} records left after refining ({})", vacancies.len(), accepted_currency);
        PipelineWithRefined { vacancies }
    }
}

#[must_use = "refined records must be enriched or saved"]
pub struct PipelineWithRefined {
    vacancies: Vec<RefinedVacancy>,
}

impl PipelineWithRefined {
    pub fn enrich(self, enricher: DetailEnricher) -> Result<PipelineWithEnriched> {
        let outcome = enricher.start_enrich(&self.vacancies)?;
        Ok(PipelineWithEnriched {
            vacancies: outcome.enriched,
            failures: outcome.failures,
        })
    }
}

#[must_use = "pipeline must end with .save() to execute"]
pub struct PipelineWithEnriched {
    vacancies: Vec<EnrichedVacancy>,
    failures: Vec<EnrichFailure>,
}

impl PipelineWithEnriched {
    pub fn save(self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        save_to_csv(&self.vacancies, &path)
            .inspect(|_| println!("✅ csv saved: {}", path))
            .inspect_err(|e| eprintln!("❌ csv save failed ({}): {}", path, e))?;

        if !self.failures.is_empty() {
            eprintln!("{} vacancies were skipped during enrichment", self.failures.len());
        }
        Ok(())
    }
}
