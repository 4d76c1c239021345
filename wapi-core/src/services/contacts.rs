// src/services/contacts.rs

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::Error;
use crate::eventbus::EventBus;
use crate::seed;
use crate::services::{CrudService, Paginated, Toasts, listing};
use crate::utils::time::today;
use wapi_common::models::{Contact, ContactFilter, ContactLabel};
use wapi_common::traits::Repository;

pub const SAMPLE_CSV_FILE_NAME: &str = "sample_contacts.csv";

const SAMPLE_ROWS: [(&str, &str); 2] = [
    ("John Doe", "+15551234567"),
    ("Jane Smith", "+15551234568"),
];

const CONTACT_TOASTS: Toasts = Toasts {
    created: "Contact created successfully",
    updated: "Contact updated successfully",
    deleted: "Contact deleted successfully",
    duplicated: "Contact duplicated successfully",
};

const LABEL_TOASTS: Toasts = Toasts {
    created: "Label created successfully",
    updated: "Label updated successfully",
    deleted: "Label deleted successfully",
    duplicated: "Label duplicated successfully",
};

pub struct ContactService {
    crud: CrudService<Contact>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn Repository<Contact>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, CONTACT_TOASTS) }
    }

    pub async fn filter(&self, filter: &ContactFilter) -> Result<Vec<Contact>, Error> {
        let contacts = self.crud.list().await?;
        if filter.is_empty() {
            return Ok(contacts);
        }
        Ok(contacts.into_iter().filter(|c| filter.matches(c)).collect())
    }

    /// The import template offered for download: a `name,phone` header and
    /// two example rows, without a trailing newline.
    pub fn sample_csv() -> Result<String, Error> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(["name", "phone"])?;
        for (name, phone) in SAMPLE_ROWS {
            writer.write_record([name, phone])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Storage(format!("sample csv: {}", e)))?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(text.trim_end_matches('\n').to_string())
    }

    /// Write the sample file into `dir` and return its path.
    pub fn write_sample_csv(dir: &Path) -> Result<PathBuf, Error> {
        let path = dir.join(SAMPLE_CSV_FILE_NAME);
        std::fs::write(&path, Self::sample_csv()?)?;
        info!("wrote {}", path.display());
        Ok(path)
    }
}

impl Deref for ContactService {
    type Target = CrudService<Contact>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

pub struct ContactLabelService {
    crud: CrudService<ContactLabel>,
}

impl ContactLabelService {
    pub fn new(repo: Arc<dyn Repository<ContactLabel>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, LABEL_TOASTS) }
    }

    /// Replace every label with VIP, Customer and Lead.
    pub async fn make_default_labels(&self) -> Result<Vec<ContactLabel>, Error> {
        let labels = self.crud.repo().replace_all(seed::default_labels(today())).await?;
        self.crud.notifier().success("Default labels created").await;
        Ok(labels)
    }

    pub async fn page(
        &self,
        term: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Paginated<ContactLabel>, Error> {
        let hits = listing::search(self.crud.list().await?, term);
        Ok(Paginated::new(hits, page, per_page))
    }
}

impl Deref for ContactLabelService {
    type Target = CrudService<ContactLabel>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ContactLabelForm;
    use crate::repositories::{CollectionRepository, InMemoryStore};

    #[test]
    fn sample_csv_matches_the_download() -> Result<(), Error> {
        assert_eq!(
            ContactService::sample_csv()?,
            "name,phone\nJohn Doe,+15551234567\nJane Smith,+15551234568"
        );
        Ok(())
    }

    #[test]
    fn sample_csv_lands_in_the_given_directory() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let path = ContactService::write_sample_csv(dir.path())?;
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(SAMPLE_CSV_FILE_NAME));

        let mut reader = csv::Reader::from_path(&path)?;
        let names: Vec<String> = reader
            .records()
            .map(|r| r.map(|rec| rec[0].to_string()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, ["John Doe", "Jane Smith"]);
        Ok(())
    }

    #[tokio::test]
    async fn filter_by_country() -> Result<(), Error> {
        let repo = CollectionRepository::new(Arc::new(InMemoryStore::new()), seed::contacts()?);
        let svc = ContactService::new(Arc::new(repo), None);

        let filter = ContactFilter { country: "united states".into(), ..Default::default() };
        let names: Vec<String> = svc.filter(&filter).await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Sarah Johnson", "Lisa Thompson"]);
        assert_eq!(svc.filter(&ContactFilter::default()).await?.len(), 6);
        Ok(())
    }

    #[tokio::test]
    async fn default_labels_replace_custom_ones() -> Result<(), Error> {
        let repo = CollectionRepository::<ContactLabel>::unseeded(Arc::new(InMemoryStore::new()));
        let svc = ContactLabelService::new(Arc::new(repo), None);

        let form = ContactLabelForm { name: "Wholesale".into(), ..Default::default() };
        let labels = svc.submit_new(form).await?;
        assert_eq!(labels[0].color, ContactLabel::DEFAULT_COLOR);

        let labels = svc.make_default_labels().await?;
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["VIP", "Customer", "Lead"]);
        assert_eq!(svc.page("cust", 1, 10).await?.total, 2);
        Ok(())
    }
}
