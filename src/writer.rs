use crate::models::EnrichedVacancy;
use crate::Result;
use std::fs::File;
use std::io::Write;

/// Output column order. Written explicitly so an empty run still produces
/// a file with the full header row.
const HEADERS: [&str; 13] = [
    "id",
    "name",
    "city",
    "schedule",
    "accept_temporary",
    "published_at",
    "salary_mean",
    "skills",
    "experience",
    "professional_role",
    "employer",
    "employer_trusted",
    "alternate_url",
];

pub fn save_to_csv(vacancies: &[EnrichedVacancy], path: &str) -> Result<()> {
    let file = File::create(path)?;
    write_csv(vacancies, file)
}

fn write_csv<W: Write>(vacancies: &[EnrichedVacancy], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);

    writer.write_record(HEADERS)?;
    for vacancy in vacancies {
        writer.serialize(vacancy)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(id: &str) -> EnrichedVacancy {
        EnrichedVacancy {
            id: id.to_string(),
            name: "Data Engineer".to_string(),
            city: Some("Москва".to_string()),
            schedule: None,
            accept_temporary: Some(false),
            published_at: "2024-03-01T10:00:00+0300".to_string(),
            salary_mean: 180000,
            skills: vec!["Python".to_string(), "SQL".to_string()],
            experience: "От 1 года до 3 лет".to_string(),
            professional_role: "Дата-сайентист".to_string(),
            employer: "Yandex".to_string(),
            employer_trusted: true,
            alternate_url: format!("https://hh.ru/vacancy/{}", id),
        }
    }

    #[test]
    fn round_trip_preserves_rows_and_columns() {
        let mut buffer = Vec::new();
        write_csv(&[enriched("1"), enriched("2")], &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        assert_eq!(reader.headers().unwrap(), &HEADERS[..]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == HEADERS.len()));
    }

    #[test]
    fn empty_set_still_writes_the_header_row() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        assert_eq!(reader.headers().unwrap(), &HEADERS[..]);
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn skills_cell_is_a_bracketed_list() {
        let mut buffer = Vec::new();
        write_csv(&[enriched("1")], &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[7], r#"["Python","SQL"]"#);
        // empty optional columns come out as empty cells
        assert_eq!(&row[3], "");
    }
}
