pub mod client;
pub mod enricher;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod refiner;
pub mod utils;
pub mod writer;

pub use client::{HhClient, HhCrawlConfig};
pub use enricher::{DetailEnricher, EnrichOutcome, EnricherConfig};
pub use models::{EnrichFailure, EnrichedVacancy, RawVacancy, RefinedVacancy, Vacancy};
pub use pipeline::HarvestPipeline;
pub use writer::save_to_csv;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
