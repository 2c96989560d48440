use hh_harvester::{DetailEnricher, EnricherConfig, HarvestPipeline, HhClient, HhCrawlConfig};
use hh_harvester::Result;

fn main() -> Result<()> {
    let keywords = [
        "machine AND learning",
        "data AND science",
        "sql",
        "NLP",
        "spark",
        "hadoop",
        "pandas",
        "dask",
        "deep AND learning",
        "pytorch",
        "tensorflow",
        "keras",
        "ai AND developer",
        "computer AND vision",
        "нейронные AND сети",
        "big AND data",
    ];

    HarvestPipeline::new()
        .collect(HhClient::new(HhCrawlConfig {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            pages_per_keyword: 100,
        }))?
        .normalize()
        .refine("RUR")
        .enrich(DetailEnricher::new(EnricherConfig { thread_count: 1 }))?
        .save("vacancies.csv")
}
